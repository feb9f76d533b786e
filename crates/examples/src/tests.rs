use clap::Parser;
use pretty_assertions::assert_eq;
use trellis::{
    Canvas, Error, Screen,
    backend::test::TestBackend,
    error::Result,
    event::key::{Key, KeyCode},
    geom::Expanse,
    runloop::{CtrlCBehavior, main_loop},
};
use trellis_widgets::{FormData, Widget};

use crate::{Args, buttons, checkboxes, inputs, modal, radios, selects, signup, table};

fn screen() -> Screen {
    Screen::new(Expanse::new(80, 40))
}

fn press(s: &mut Screen, keys: &[Key]) -> Result<()> {
    for k in keys {
        s.handle_key(*k)?;
    }
    Ok(())
}

#[test]
fn args() {
    let a = Args::parse_from(["demo", "--dump-on-ctrl-c", "--panic-hook"]);
    let opts = a.options();
    assert_eq!(opts.ctrl_c, CtrlCBehavior::DumpAndExit);
    assert!(opts.install_panic_hook);
    let a = Args::parse_from(["demo", "--log", "trace.log"]);
    assert_eq!(a.options().ctrl_c, CtrlCBehavior::Exit);
    assert_eq!(a.log.as_deref().and_then(|p| p.to_str()), Some("trace.log"));
}

#[test]
fn password_rule() {
    assert!(inputs::password_ok("1abc"));
    assert!(!inputs::password_ok("abc1"));
    assert!(!inputs::password_ok(""));
}

#[test]
fn summary_lines() -> Result<()> {
    let mut data = FormData::default();
    data.inputs.insert("Name".into(), "Ada".into());
    data.check_boxes.insert("Age 18+".into(), true);
    data.radios.insert("Favorite".into(), "Go".into());
    assert_eq!(
        signup::summary(&data)?,
        "Name: Ada\nAge 18+: true\nFavorite: Go\n"
    );
    Ok(())
}

#[test]
fn signup_register() -> Result<()> {
    let mut s = screen();
    let form = signup::setup(&mut s)?;
    let labels: Vec<String> = form.buttons().iter().map(|b| b.label()).collect();
    assert_eq!(labels, vec!["Register", "Cancel"]);

    // Register with nothing filled in: every required field complains.
    form.set_current_item(&mut s, 6)?;
    press(&mut s, &[KeyCode::Enter.into()])?;
    assert!(!s.has_region("summary"));
    for f in ["First Name", "Last Name", "Password"] {
        assert!(s.has_region(&format!("{f}:error")), "{f}");
    }

    form.set_current_item(&mut s, 0)?;
    press(
        &mut s,
        &[
            'A'.into(),
            KeyCode::Tab.into(),
            'B'.into(),
            KeyCode::Tab.into(),
            '1'.into(),
            KeyCode::Tab.into(),
            Key::SPACE,
            KeyCode::Tab.into(),
            KeyCode::Tab.into(),
            KeyCode::Enter.into(),
            KeyCode::Tab.into(),
        ],
    )?;
    assert_eq!(form.current_item(), 6);
    assert_eq!(s.region("Password")?.display_lines(), vec!["*"]);
    press(&mut s, &[KeyCode::Enter.into()])?;

    let text = s.region("summary:text")?.buffer();
    assert!(text.contains("First Name: A"));
    assert!(text.contains("Age 18+: true"));
    assert!(text.contains("Language: Japanese"));
    assert!(text.contains("Favorite: Go"));
    assert_eq!(s.current(), Some("OK"));

    press(&mut s, &[KeyCode::Enter.into()])?;
    assert!(!s.has_region("summary"));
    assert!(!s.has_region("OK"));
    assert_eq!(s.current(), Some("Register"));
    Ok(())
}

#[test]
fn signup_cancel_quits() -> Result<()> {
    let mut s = Screen::new(Expanse::new(1, 1));
    let _form = signup::setup(&mut s)?;
    let (out, mut backend) = TestBackend::create(
        Expanse::new(80, 40),
        [KeyCode::BackTab, KeyCode::Enter, KeyCode::Enter].map(Key::from),
    );
    main_loop(&mut s, &mut backend)?;
    let out = out.lock().map_err(|e| Error::Render(e.to_string()))?;
    // The loop ended on Cancel, before the last key was read.
    assert_eq!(out.frames, 2);
    assert_eq!(out.stops, 1);
    Ok(())
}

#[test]
fn button_demo() -> Result<()> {
    let mut s = screen();
    let buttons = buttons::setup(&mut s)?;
    assert!(buttons[0].has_focus(&s));
    press(&mut s, &[KeyCode::Tab.into()])?;
    assert!(buttons[1].has_focus(&s));
    assert!(!s.region("Save")?.highlight);
    assert_eq!(s.handle_key(KeyCode::Enter.into()), Err(Error::Quit));
    Ok(())
}

#[test]
fn checkbox_demo() -> Result<()> {
    let mut s = screen();
    let boxes = checkboxes::setup(&mut s)?;
    press(&mut s, &[Key::SPACE, KeyCode::Tab.into(), KeyCode::Tab.into(), Key::SPACE])?;
    let checked: Vec<bool> = boxes.iter().map(|b| b.is_checked()).collect();
    assert_eq!(checked, vec![true, false, true]);
    Ok(())
}

#[test]
fn widget_demos_draw() -> Result<()> {
    let mut s = screen();
    let r = radios::setup(&mut s)?;
    assert_eq!(r.options().len(), 4);

    let mut s = screen();
    let sel = selects::setup(&mut s)?;
    press(&mut s, &[KeyCode::Enter.into()])?;
    assert!(sel.is_expanded());
    assert_eq!(s.handle_key(KeyCode::Esc.into()), Err(Error::Quit));

    let mut s = screen();
    let m = modal::setup(&mut s)?;
    assert!(m.has_focus(&s));
    assert!(s.region("question:text")?.buffer().contains("new laptop?"));

    let mut s = Screen::new(Expanse::new(81, 24));
    let t = table::setup(&mut s)?;
    assert_eq!(t.rows().len(), 2);
    let canvas = Canvas::render(&s);
    for c in ["Users", "FirstName", "Height"] {
        assert!(canvas.contains(c), "{c}");
    }
    assert_eq!(s.handle_key(KeyCode::Esc.into()), Err(Error::Quit));
    Ok(())
}

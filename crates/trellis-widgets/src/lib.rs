//! Widgets for the trellis terminal host.
//!
//! Widgets are cheap, clonable handles over shared state. Each one owns one
//! or more screen regions and the key bindings on them, creates both on
//! `draw` and removes both on `close`. A [`Form`] arranges a sequence of
//! widgets and moves focus between them.

/// Push buttons.
mod button;
/// Check boxes.
mod checkbox;
/// The form container.
mod form;
/// Input fields.
mod input;
/// Modal dialogs.
mod modal;
/// Radio groups.
mod radio;
/// Selects.
mod select;
/// Tables.
mod table;
/// Field validation.
mod validator;
/// The widget trait.
mod widget;

pub use button::Button;
pub use checkbox::CheckBox;
pub use form::{Form, FormData, WeakForm};
pub use input::{InputField, MASK};
pub use modal::{Modal, WeakModal};
pub use radio::{Radio, RadioMode};
pub use select::Select;
pub use table::{Table, TableCell, TableHeader, TableRow};
pub use validator::Validator;
pub use widget::{Attributes, Widget, WidgetKind};

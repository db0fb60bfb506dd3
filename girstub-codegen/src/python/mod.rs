//! Python stub text generation modules.

pub mod callables;
pub mod classes;
pub mod docstring;
pub mod enums;

pub use callables::CallableGenerator;
pub use classes::ClassGenerator;
pub use docstring::docstring;
pub use enums::EnumGenerator;

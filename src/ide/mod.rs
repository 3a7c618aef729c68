//! Editor-facing features built on the semantic layer.

pub mod completion;
pub mod goto;
pub mod references;
pub mod rename;

pub use completion::{completions, CompletionItem, CompletionItemKind};
pub use goto::{goto_definition, NavigationTarget};
pub use references::find_usages;
pub use rename::{rename, RenameError};

mod reference;
mod registry;

pub use reference::{LibraryUsage, ReferencedLibrary};
pub use registry::LibraryRegistry;

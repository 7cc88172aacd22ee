//! Font source adapters.

pub mod directory;
pub mod embedded;

pub use directory::DirectoryFonts;
pub use embedded::EmbeddedFonts;

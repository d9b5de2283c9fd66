mod init;
pub use init::*;
mod level;
pub use level::*;

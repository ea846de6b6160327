// Not every utils is used in every test, so we allow dead code
#![allow(unused_imports, dead_code)]

mod multipart;
pub use multipart::*;
mod signer;
pub use signer::*;
mod test_setup;
pub use test_setup::*;

//! Value objects - small immutable types and pure helpers shared by the features

mod email;
mod page;
mod reference;

pub use email::mask_email;
pub use page::{PageRequest, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use reference::{ReferenceEncoder, ReferenceError};

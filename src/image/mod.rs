pub mod depth;
pub mod io;
pub mod mask;
pub mod traits;

pub use self::depth::DepthMap;
pub use self::mask::LabelMask;
pub use self::traits::{Raster, Rows};

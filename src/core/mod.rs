pub mod geometry;
pub mod graphic;

pub use geometry::{MapPoint, ScreenPoint};
pub use graphic::{AttributeValue, Graphic, GraphicId, LayerId};

mod loc;
mod pos;

pub use loc::Location;
pub use pos::Position;

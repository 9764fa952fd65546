//! Protocol module containing the frame types and the JSON codec.

pub mod codec;
pub mod messages;

pub use codec::{decode_frame, encode_frame, FrameError};
pub use messages::*;

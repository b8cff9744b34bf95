pub mod decode;
pub mod message;
pub mod publish;
pub mod submit;
pub mod validate;

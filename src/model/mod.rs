pub(crate) mod operation;
pub(crate) mod result;

pub use operation::{DESCRIPTORS, OperationDescriptor, OperationId, RequestPayload, field_label};
pub use result::OperationResult;

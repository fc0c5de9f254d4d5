pub mod codec;
pub mod custom_data;
pub mod error;
pub mod frame;
pub mod message;
pub mod set;

pub use codec::{
    check_max_len, payload_to_json, payload_to_map, try_parse_payload, CustomParser,
    CustomSerializer, Payload, RequestPayload, ResponsePayload,
};
pub use custom_data::{CustomData, CUSTOM_DATA_FIELD};
pub use error::{EmptyCollection, ErrorCode, ParseError};
pub use set::{non_empty, SetOf};

mod availability_status;
mod availability_type;
mod charge_point_error_code;
mod charge_point_status;
mod configuration_status;
mod data_transfer_status;
mod file_transfer_status;
mod generic_status;
mod key_value;
mod location;
mod measurand;
mod meter_value;
mod phase;
mod reading_context;
mod registration_status;
mod reset_status;
mod reset_type;
mod sampled_value;
mod signature_policy;
mod status_info;
mod unit_of_measure;
mod user_role;
mod value_format;

pub use availability_status::AvailabilityStatus;
pub use availability_type::AvailabilityType;
pub use charge_point_error_code::ChargePointErrorCode;
pub use charge_point_status::ChargePointStatus;
pub use configuration_status::ConfigurationStatus;
pub use data_transfer_status::DataTransferStatus;
pub use file_transfer_status::FileTransferStatus;
pub use generic_status::GenericStatus;
pub use key_value::KeyValue;
pub use location::Location;
pub use measurand::Measurand;
pub use meter_value::MeterValue;
pub use phase::Phase;
pub use reading_context::ReadingContext;
pub use registration_status::RegistrationStatus;
pub use reset_status::ResetStatus;
pub use reset_type::ResetType;
pub use sampled_value::SampledValue;
pub use signature_policy::SignaturePolicy;
pub use status_info::StatusInfo;
pub use unit_of_measure::UnitOfMeasure;
pub use user_role::UserRole;
pub use value_format::ValueFormat;

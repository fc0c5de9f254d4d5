use super::super::types::MeterValue;
use crate::format::{non_empty, EmptyCollection, RequestPayload, ResponsePayload, SetOf};

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct MeterValuesRequest {
    pub connector_id: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<i32>,
    #[serde(deserialize_with = "non_empty")]
    pub meter_value: SetOf<MeterValue>,
}

impl MeterValuesRequest {
    pub fn new(
        connector_id: usize,
        transaction_id: Option<i32>,
        meter_value: impl IntoIterator<Item = MeterValue>,
    ) -> Result<Self, EmptyCollection> {
        Ok(Self {
            connector_id,
            transaction_id,
            meter_value: SetOf::non_empty(meter_value)?,
        })
    }
}

impl RequestPayload for MeterValuesRequest {
    const ACTION: &'static str = "MeterValues";
    type Response = MeterValuesResponse;
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct MeterValuesResponse {}

impl ResponsePayload for MeterValuesResponse {
    fn failure_default() -> Self {
        Self {}
    }
}

plain_payload!(MeterValuesRequest, MeterValuesResponse);
display_as_json!(MeterValuesRequest, MeterValuesResponse);

use chrono::{DateTime, Utc};

use super::SampledValue;
use crate::format::{non_empty, EmptyCollection, SetOf};

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct MeterValue {
    pub timestamp: DateTime<Utc>,
    #[serde(deserialize_with = "non_empty")]
    pub sampled_value: SetOf<SampledValue>,
}

impl MeterValue {
    pub fn new(
        timestamp: DateTime<Utc>,
        sampled_value: impl IntoIterator<Item = SampledValue>,
    ) -> Result<Self, EmptyCollection> {
        Ok(Self {
            timestamp,
            sampled_value: SetOf::non_empty(sampled_value)?,
        })
    }
}

use bon::Builder;
use serde::{Deserialize, de::DeserializeOwned};
use serde_with::serde_as;

use crate::quantity::energy::KilowattHours;

/// Paged Zaptec response, only the first page is ever requested.
#[must_use]
#[serde_as]
#[derive(Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct Page<T> {
    #[serde(rename = "Data", default)]
    #[serde_as(as = "serde_with::VecSkipError<_>")]
    pub data: Vec<T>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Installation {
    #[serde(rename = "Id")]
    pub id: String,

    #[serde(rename = "Name")]
    pub name: Option<String>,
}

impl Installation {
    /// Name to show on documents, falling back to the identifier when missing or empty.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|name| !name.is_empty()).unwrap_or(&self.id)
    }
}

/// Single charging session as reported by the charge history.
///
/// Timestamps are kept as received: the invoice only reformats them when they parse.
#[derive(Clone, Debug, Default, Deserialize, Builder)]
pub struct ChargeSession {
    #[builder(into)]
    #[serde(rename = "StartDateTime")]
    pub start: Option<String>,

    #[builder(into)]
    #[serde(rename = "EndDateTime")]
    pub end: Option<String>,

    #[builder(into)]
    #[serde(rename = "DeviceName")]
    pub device_name: Option<String>,

    #[builder(into)]
    #[serde(rename = "Energy")]
    pub energy: Option<KilowattHours>,
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::prelude::*;

    #[test]
    fn test_deserialize_charge_history_ok() -> Result {
        // language=json
        const RESPONSE: &str = r#"{
            "Pages": 1,
            "Data": [
                {
                    "Id": "5c0e5a4f-2b1c-4bd4-9a4f-1b2f0c3d4e5f",
                    "DeviceId": "ZAP012345",
                    "StartDateTime": "2024-06-03T17:02:11.653",
                    "EndDateTime": "2024-06-03T21:45:00.107",
                    "Energy": 10.0,
                    "DeviceName": "Garasje"
                },
                {
                    "StartDateTime": "2024-06-04T08:00:00Z",
                    "EndDateTime": null,
                    "DeviceName": null
                },
                "garbage"
            ]
        }"#;
        let page = serde_json::from_str::<Page<ChargeSession>>(RESPONSE)?;
        assert_eq!(page.data.len(), 2);
        assert_abs_diff_eq!(page.data[0].energy.unwrap().into_inner(), 10.0);
        assert_eq!(page.data[0].device_name.as_deref(), Some("Garasje"));
        assert!(page.data[1].energy.is_none());
        assert!(page.data[1].end.is_none());
        Ok(())
    }

    #[test]
    fn test_deserialize_installations_ok() -> Result {
        // language=json
        const RESPONSE: &str = r#"{
            "Data": [
                { "Id": "INST1", "Name": "Hytta" },
                { "Id": "INST2", "Name": null },
                { "Id": "INST3", "Name": "" }
            ]
        }"#;
        let page = serde_json::from_str::<Page<Installation>>(RESPONSE)?;
        assert_eq!(page.data[0].display_name(), "Hytta");
        assert_eq!(page.data[1].display_name(), "INST2");
        assert_eq!(page.data[2].display_name(), "INST3");
        Ok(())
    }

    #[test]
    fn test_deserialize_missing_data_ok() -> Result {
        let page = serde_json::from_str::<Page<Installation>>("{}")?;
        assert!(page.data.is_empty());
        Ok(())
    }
}

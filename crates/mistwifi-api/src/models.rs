// Mist cloud response types
//
// The stats endpoint returns a bare JSON array, one object per organization
// scope. Counters are optional because the vendor omits them for empty orgs,
// and older payloads spell them with a `num_` prefix.

use serde::{Deserialize, Serialize};

/// One element of the `GET /api/v1/{org_id}/stats` response array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawOrgStats")]
pub struct OrgStats {
    pub title: String,
    pub uuid: String,
    /// Devices claimed into the org inventory.
    pub claimed: Option<i64>,
    /// Inventory devices assigned to a site.
    pub inuse: Option<i64>,
    pub connected: Option<i64>,
    pub disconnected: Option<i64>,
    /// Wireless clients currently associated.
    pub clients: Option<i64>,
    pub sites: Option<i64>,
}

/// Wire shape with both spellings. A payload may carry either or both;
/// the short name wins when both are present.
#[derive(Deserialize)]
struct RawOrgStats {
    title: String,
    uuid: String,
    #[serde(default)]
    claimed: Option<i64>,
    #[serde(default)]
    num_inventory: Option<i64>,
    #[serde(default)]
    inuse: Option<i64>,
    #[serde(default)]
    num_devices: Option<i64>,
    #[serde(default)]
    connected: Option<i64>,
    #[serde(default)]
    num_devices_connected: Option<i64>,
    #[serde(default)]
    disconnected: Option<i64>,
    #[serde(default)]
    num_devices_disconnected: Option<i64>,
    #[serde(default)]
    clients: Option<i64>,
    #[serde(default)]
    num_clients: Option<i64>,
    #[serde(default)]
    sites: Option<i64>,
    #[serde(default)]
    num_sites: Option<i64>,
}

impl From<RawOrgStats> for OrgStats {
    fn from(raw: RawOrgStats) -> Self {
        Self {
            title: raw.title,
            uuid: raw.uuid,
            claimed: raw.claimed.or(raw.num_inventory),
            inuse: raw.inuse.or(raw.num_devices),
            connected: raw.connected.or(raw.num_devices_connected),
            disconnected: raw.disconnected.or(raw.num_devices_disconnected),
            clients: raw.clients.or(raw.num_clients),
            sites: raw.sites.or(raw.num_sites),
        }
    }
}

impl OrgStats {
    /// Counter names paired with their values, in emission order.
    pub fn counters(&self) -> [(&'static str, Option<i64>); 6] {
        [
            ("claimed", self.claimed),
            ("inuse", self.inuse),
            ("connected", self.connected),
            ("disconnected", self.disconnected),
            ("clients", self.clients),
            ("sites", self.sites),
        ]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn decodes_flat_counters() {
        let body = r#"{"title":"siteA","uuid":"u1","clients":5,"sites":1,"connected":3,"disconnected":1,"inuse":4,"claimed":5}"#;
        let stats: OrgStats = serde_json::from_str(body).unwrap();
        assert_eq!(stats.title, "siteA");
        assert_eq!(stats.uuid, "u1");
        assert_eq!(stats.clients, Some(5));
        assert_eq!(stats.claimed, Some(5));
        assert_eq!(stats.inuse, Some(4));
    }

    #[test]
    fn accepts_num_prefixed_spelling() {
        let body = r#"{
            "title": "HQ",
            "uuid": "6b2c",
            "num_sites": 2,
            "num_devices": 10,
            "num_inventory": 12,
            "num_devices_connected": 9,
            "num_devices_disconnected": 1,
            "num_clients": 140
        }"#;
        let stats: OrgStats = serde_json::from_str(body).unwrap();
        assert_eq!(stats.sites, Some(2));
        assert_eq!(stats.inuse, Some(10));
        assert_eq!(stats.claimed, Some(12));
        assert_eq!(stats.connected, Some(9));
        assert_eq!(stats.disconnected, Some(1));
        assert_eq!(stats.clients, Some(140));
    }

    #[test]
    fn both_spellings_in_one_record() {
        let body = r#"{"title":"t","uuid":"u","claimed":1,"num_inventory":7,"num_clients":3}"#;
        let stats: OrgStats = serde_json::from_str(body).unwrap();
        assert_eq!(stats.claimed, Some(1));
        assert_eq!(stats.clients, Some(3));
    }

    #[test]
    fn missing_counters_stay_absent() {
        let stats: OrgStats =
            serde_json::from_str(r#"{"title":"empty","uuid":"u0","extra":"ignored"}"#).unwrap();
        assert!(stats.counters().iter().all(|(_, v)| v.is_none()));
    }

    #[test]
    fn title_is_required() {
        assert!(serde_json::from_str::<OrgStats>(r#"{"uuid":"u1"}"#).is_err());
    }
}

//! JSON output.

use serde::Serialize;

/// Pretty-print any result as JSON.
pub fn render_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubnetDemand;
    use crate::processing::allocate_vlsm;

    #[test]
    fn test_render_vlsm_json() {
        let result = allocate_vlsm(
            &"192.168.1.0/24".parse().unwrap(),
            &[SubnetDemand::new("B", 50), SubnetDemand::new("A", 100)],
        )
        .unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&render_json(&result).unwrap()).unwrap();
        assert_eq!(json["method"]["name"], "vlsm");
        assert_eq!(json["network"], "192.168.1.0/24");
        assert_eq!(json["subnets"][0]["label"]["name"], "B");
        assert_eq!(json["subnets"][0]["label"]["rank"], 2);
        assert_eq!(json["subnets"][0]["block"], "192.168.1.128/26");
        assert_eq!(json["subnets"][1]["block"], "192.168.1.0/25");
    }
}

use relay_core::expansion::NodeFamily;
use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// A node addressed as `turn:family:key`, e.g. `cnv-3:todo:t1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRef {
    pub turn_id: String,
    pub family: NodeFamily,
    pub key: String,
}

pub fn parse_node_ref(raw: &str) -> anyhow::Result<NodeRef> {
    let mut parts = raw.splitn(3, ':');
    let (Some(turn_id), Some(family), Some(key)) = (parts.next(), parts.next(), parts.next())
    else {
        anyhow::bail!("invalid node '{raw}': expected turn:family:key");
    };
    let family = match family {
        "tree" => NodeFamily::Tree,
        "todo" => NodeFamily::Todo,
        other => anyhow::bail!("invalid node family '{other}': expected tree or todo"),
    };
    if turn_id.is_empty() || key.is_empty() {
        anyhow::bail!("invalid node '{raw}': turn and key must not be empty");
    }
    Ok(NodeRef {
        turn_id: turn_id.to_string(),
        family,
        key: key.to_string(),
    })
}

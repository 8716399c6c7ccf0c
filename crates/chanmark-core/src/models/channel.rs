//! Channel records as seen by bookmark consumers.
//!
//! Only the fields needed to attach bookmarks and to compute list etags are
//! modeled here.

use serde::{Deserialize, Serialize};

use super::composite::BookmarkWithFile;

/// A channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Channel {
    pub id: String,
    pub create_at: i64,
    pub update_at: i64,
    pub delete_at: i64,
    pub team_id: String,
    #[serde(rename = "type")]
    pub channel_type: String,
    pub display_name: String,
    pub name: String,
    pub creator_id: String,
    /// Time of the most recent post in the channel.
    pub last_post_at: i64,
}

/// A channel joined with its team's display data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelWithTeamData {
    #[serde(flatten)]
    pub channel: Channel,
    pub team_display_name: String,
    pub team_name: String,
    pub team_update_at: i64,
}

/// Channel list as loaded for one client request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelList(pub Vec<Channel>);

/// Team-joined channel list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelListWithTeamData(pub Vec<ChannelWithTeamData>);

/// A channel with its bookmarks attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelWithBookmarks {
    #[serde(flatten)]
    pub channel: Channel,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bookmarks: Vec<BookmarkWithFile>,
}

/// A team-joined channel with its bookmarks attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelWithTeamDataAndBookmarks {
    #[serde(flatten)]
    pub channel: ChannelWithTeamData,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bookmarks: Vec<BookmarkWithFile>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_team_data_flattens_channel_fields() {
        let c = ChannelWithTeamData {
            channel: Channel {
                id: "c1".to_string(),
                channel_type: "O".to_string(),
                last_post_at: 5,
                ..Channel::default()
            },
            team_name: "core".to_string(),
            team_update_at: 9,
            ..ChannelWithTeamData::default()
        };

        let value = serde_json::to_value(&c).unwrap();
        assert_eq!(value["id"], json!("c1"));
        assert_eq!(value["type"], json!("O"));
        assert_eq!(value["last_post_at"], json!(5));
        assert_eq!(value["team_update_at"], json!(9));
        assert!(value.get("channel").is_none());
    }

    #[test]
    fn test_channel_list_is_a_json_array() {
        let list: ChannelList = serde_json::from_value(json!([
            {"id": "a", "update_at": 1},
            {"id": "b", "last_post_at": 2}
        ]))
        .unwrap();

        assert_eq!(list.0.len(), 2);
        assert_eq!(list.0[1].last_post_at, 2);
    }

    #[test]
    fn test_channel_without_bookmarks_omits_key() {
        let c = ChannelWithBookmarks {
            channel: Channel {
                id: "c1".to_string(),
                ..Channel::default()
            },
            bookmarks: Vec::new(),
        };

        let value = serde_json::to_value(&c).unwrap();
        assert!(value.get("bookmarks").is_none());
    }
}

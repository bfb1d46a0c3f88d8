use lookalike_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Roster file expected in every group folder
pub const ROSTER_FILE: &str = "members.json";

/// One roster entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "imageURL", default)]
    pub image_url: String,
}

/// A member to download into its group folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchItem {
    pub group_dir: PathBuf,
    pub member: Member,
}

/// Read `<root>/<group>/members.json` for every group folder
///
/// Group folders without a roster are logged and skipped.
pub fn load_rosters<P: AsRef<Path>>(root: P) -> Result<Vec<FetchItem>> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(Error::NotFound(root.display().to_string()));
    }

    let mut groups = Vec::new();
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() {
            groups.push(path);
        }
    }
    groups.sort();

    let mut items = Vec::new();
    for group_dir in groups {
        let roster = group_dir.join(ROSTER_FILE);
        if !roster.is_file() {
            warn!("No {} in {:?}, skipping", ROSTER_FILE, group_dir);
            continue;
        }

        let members: Vec<Member> = serde_json::from_slice(&fs::read(&roster)?)?;
        let group = group_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("{}: {} profile images", group, members.len());

        items.extend(members.into_iter().map(|member| FetchItem {
            group_dir: group_dir.clone(),
            member,
        }));
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_rosters() {
        let dir = tempfile::tempdir().unwrap();
        let twice = dir.path().join("twice");
        let itzy = dir.path().join("itzy");
        fs::create_dir_all(&twice).unwrap();
        fs::create_dir_all(&itzy).unwrap();
        fs::create_dir_all(dir.path().join("empty")).unwrap();
        fs::write(
            twice.join(ROSTER_FILE),
            br#"[{"name": "Mina", "imageURL": "https://img.example/mina.jpg"},
                {"name": "Dahyun", "imageURL": "https://img.example/dahyun.jpg"}]"#,
        )
        .unwrap();
        fs::write(itzy.join(ROSTER_FILE), br#"[{"name": "Chaeryeong"}]"#).unwrap();

        let items = load_rosters(dir.path()).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].group_dir, itzy);
        assert_eq!(items[0].member.image_url, "");
        assert_eq!(items[1].member.name, "Mina");
        assert_eq!(items[2].member.image_url, "https://img.example/dahyun.jpg");
    }

    #[test]
    fn test_malformed_roster() {
        let dir = tempfile::tempdir().unwrap();
        let group = dir.path().join("twice");
        fs::create_dir_all(&group).unwrap();
        fs::write(group.join(ROSTER_FILE), b"{not json").unwrap();
        assert!(matches!(load_rosters(dir.path()), Err(Error::Serialization(_))));
    }
}

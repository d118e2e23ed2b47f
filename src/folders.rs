use std::collections::HashMap;
use std::fmt;

use bitflags::bitflags;
use serde::{Serialize, Deserialize};
use strum::AsRefStr as StrumAsRefStr;

use crate::ids::{FolderId, GroupId};

/// Resource path the group folders app mounts its endpoints under.
pub const FOLDERS_API: &str = "/apps/groupfolders/folders";

/// Byte count the server treats as "no quota".
pub const UNLIMITED_QUOTA: i64 = -3;

bitflags! {
    /// Permission bits a group holds in a folder, matching the server's
    /// permission enumeration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Permission: u32 {
        const READ   = 1;
        const UPDATE = 2;
        const CREATE = 4;
        const DELETE = 8;
        const SHARE  = 16;
        const ALL    = 31;
    }
}

impl Serialize for Permission {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

struct PermissionVisitor;

impl<'de> serde::de::Visitor<'de> for PermissionVisitor {
    type Value = Permission;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an integer permission bitmask")
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        let bits = u32::try_from(v)
            .map_err(|_| E::invalid_value(serde::de::Unexpected::Unsigned(v), &self))?;

        // bits the enumeration does not name belong to the server, keep them
        Ok(Permission::from_bits_retain(bits))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        if v < 0 {
            return Err(E::invalid_value(serde::de::Unexpected::Signed(v), &self));
        }

        self.visit_u64(v as u64)
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        deserializer.deserialize_u32(PermissionVisitor)
    }
}

/// Storage quota of a folder. The wire representation is a byte count with
/// [`UNLIMITED_QUOTA`] standing in for no limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quota {
    Unlimited,
    Bytes(i64),
}

impl Quota {
    pub fn as_bytes(&self) -> i64 {
        match self {
            Quota::Unlimited => UNLIMITED_QUOTA,
            Quota::Bytes(v) => *v,
        }
    }
}

impl From<i64> for Quota {
    fn from(v: i64) -> Self {
        if v == UNLIMITED_QUOTA {
            Quota::Unlimited
        } else {
            Quota::Bytes(v)
        }
    }
}

impl Serialize for Quota {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_i64(self.as_bytes())
    }
}

impl<'de> Deserialize<'de> for Quota {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        i64::deserialize(deserializer).map(Quota::from)
    }
}

/// Kind of principal a manage-ACL mapping names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    StrumAsRefStr,
    Serialize, Deserialize
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MappingType {
    Group,
    User,
}

impl fmt::Display for MappingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_ref(), f)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GroupFolder {
    pub id: FolderId,
    pub mount_point: String,
    #[serde(default, with = "crate::serde::assoc")]
    pub groups: HashMap<GroupId, Permission>,
    pub quota: Quota,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub acl: bool,
}

/// Folder listing payload. The server keys folders by id and renders the
/// empty map as an empty array.
#[derive(Debug, Serialize, Deserialize)]
pub struct FolderList(
    #[serde(with = "crate::serde::assoc")]
    pub HashMap<FolderId, GroupFolder>
);

impl FolderList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: FolderId) -> Option<&GroupFolder> {
        self.0.get(&id)
    }

    pub fn iter(&self) -> std::collections::hash_map::Iter<'_, FolderId, GroupFolder> {
        self.0.iter()
    }

    pub fn into_inner(self) -> HashMap<FolderId, GroupFolder> {
        self.0
    }
}

impl IntoIterator for FolderList {
    type Item = (FolderId, GroupFolder);
    type IntoIter = std::collections::hash_map::IntoIter<FolderId, GroupFolder>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedFolder {
    pub id: FolderId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateFolder {
    pub mountpoint: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GrantAccess {
    pub group: GroupId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetPermission {
    pub permissions: Permission,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetQuota {
    pub quota: Quota,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RenameFolder {
    pub mountpoint: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ManageAcl {
    #[serde(rename = "manageACL", with = "crate::serde::bool_int")]
    pub manage_acl: bool,
    #[serde(rename = "mappingId")]
    pub mapping_id: String,
    #[serde(rename = "mappingType")]
    pub mapping_type: MappingType,
}

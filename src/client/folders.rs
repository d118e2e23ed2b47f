use serde::de::DeserializeOwned;

use crate::client::error::RequestError;
use crate::client::ApiClient;
use crate::error::OcsError;
use crate::folders::{
    CreateFolder as CreateFolderBody,
    GrantAccess as GrantAccessBody,
    SetPermission as SetPermissionBody,
    SetQuota as SetQuotaBody,
    RenameFolder as RenameFolderBody,
    ManageAcl as ManageAclBody,
    CreatedFolder,
    FolderList,
    GroupFolder,
    MappingType,
    Permission,
    Quota,
    FOLDERS_API,
};
use crate::ids::{FolderId, GroupId, UserId};
use crate::ocs::Ocs;

fn parse_data<T>(res: reqwest::blocking::Response) -> Result<T, RequestError>
where
    T: DeserializeOwned,
{
    let (meta, data) = res.json::<Ocs<T>>()?.into_parts();

    if !meta.is_ok() {
        return Err(OcsError::from(meta).into());
    }

    Ok(data)
}

fn expect_success(res: reqwest::blocking::Response) -> Result<(), RequestError> {
    parse_data::<serde_json::Value>(res).map(|_| ())
}

fn error_body(res: reqwest::blocking::Response) -> RequestError {
    match res.json::<Ocs<serde_json::Value>>() {
        Ok(body) => {
            let (meta, _) = body.into_parts();

            RequestError::Ocs(OcsError::from(meta))
        }
        Err(err) => RequestError::Transport(err),
    }
}

pub struct QueryFolders {}

impl QueryFolders {
    pub fn new() -> Self {
        QueryFolders {}
    }

    pub fn send(self, client: &ApiClient) -> Result<FolderList, RequestError> {
        let res = client.get(FOLDERS_API).send()?;

        match res.status() {
            reqwest::StatusCode::OK => parse_data(res),
            _ => Err(error_body(res)),
        }
    }
}

pub struct RetrieveFolder {
    id: FolderId,
}

impl RetrieveFolder {
    pub fn id(id: FolderId) -> Self {
        RetrieveFolder { id }
    }

    pub fn send(self, client: &ApiClient) -> Result<Option<GroupFolder>, RequestError> {
        let res = client.get(format!("{}/{}", FOLDERS_API, self.id)).send()?;

        match res.status() {
            reqwest::StatusCode::OK => Ok(Some(parse_data(res)?)),
            reqwest::StatusCode::NOT_FOUND => Ok(None),
            _ => Err(error_body(res)),
        }
    }
}

pub struct CreateFolder {
    body: CreateFolderBody,
}

impl CreateFolder {
    pub fn mount_point<M>(mountpoint: M) -> Self
    where
        M: Into<String>,
    {
        CreateFolder {
            body: CreateFolderBody {
                mountpoint: mountpoint.into(),
            },
        }
    }

    pub fn send(self, client: &ApiClient) -> Result<CreatedFolder, RequestError> {
        let res = client.post(FOLDERS_API)
            .json(&self.body)
            .send()?;

        match res.status() {
            reqwest::StatusCode::OK => parse_data(res),
            _ => Err(error_body(res)),
        }
    }
}

pub struct DeleteFolder {
    id: FolderId,
}

impl DeleteFolder {
    pub fn id(id: FolderId) -> Self {
        DeleteFolder { id }
    }

    pub fn send(self, client: &ApiClient) -> Result<(), RequestError> {
        let res = client.delete(format!("{}/{}", FOLDERS_API, self.id)).send()?;

        match res.status() {
            reqwest::StatusCode::OK => expect_success(res),
            _ => Err(error_body(res)),
        }
    }
}

pub struct GrantGroup {
    id: FolderId,
    body: GrantAccessBody,
}

impl GrantGroup {
    pub fn group<G>(id: FolderId, group: G) -> Self
    where
        G: Into<GroupId>,
    {
        GrantGroup {
            id,
            body: GrantAccessBody {
                group: group.into(),
            },
        }
    }

    pub fn send(self, client: &ApiClient) -> Result<(), RequestError> {
        let res = client.post(format!("{}/{}/groups", FOLDERS_API, self.id))
            .json(&self.body)
            .send()?;

        match res.status() {
            reqwest::StatusCode::OK => expect_success(res),
            _ => Err(error_body(res)),
        }
    }
}

pub struct RevokeGroup {
    id: FolderId,
    group: GroupId,
}

impl RevokeGroup {
    pub fn group<G>(id: FolderId, group: G) -> Self
    where
        G: Into<GroupId>,
    {
        RevokeGroup {
            id,
            group: group.into(),
        }
    }

    pub fn send(self, client: &ApiClient) -> Result<(), RequestError> {
        let res = client.delete(format!("{}/{}/groups/{}", FOLDERS_API, self.id, self.group))
            .send()?;

        match res.status() {
            reqwest::StatusCode::OK => expect_success(res),
            _ => Err(error_body(res)),
        }
    }
}

pub struct SetGroupPermission {
    id: FolderId,
    group: GroupId,
    body: SetPermissionBody,
}

impl SetGroupPermission {
    pub fn group<G>(id: FolderId, group: G, permissions: Permission) -> Self
    where
        G: Into<GroupId>,
    {
        SetGroupPermission {
            id,
            group: group.into(),
            body: SetPermissionBody { permissions },
        }
    }

    pub fn send(self, client: &ApiClient) -> Result<(), RequestError> {
        let res = client.post(format!("{}/{}/groups/{}", FOLDERS_API, self.id, self.group))
            .json(&self.body)
            .send()?;

        match res.status() {
            reqwest::StatusCode::OK => expect_success(res),
            _ => Err(error_body(res)),
        }
    }
}

pub struct SetQuota {
    id: FolderId,
    body: SetQuotaBody,
}

impl SetQuota {
    pub fn quota<Q>(id: FolderId, quota: Q) -> Self
    where
        Q: Into<Quota>,
    {
        SetQuota {
            id,
            body: SetQuotaBody {
                quota: quota.into(),
            },
        }
    }

    pub fn unlimited(id: FolderId) -> Self {
        SetQuota {
            id,
            body: SetQuotaBody {
                quota: Quota::Unlimited,
            },
        }
    }

    pub fn send(self, client: &ApiClient) -> Result<(), RequestError> {
        let res = client.post(format!("{}/{}/quota", FOLDERS_API, self.id))
            .json(&self.body)
            .send()?;

        match res.status() {
            reqwest::StatusCode::OK => expect_success(res),
            _ => Err(error_body(res)),
        }
    }
}

pub struct RenameFolder {
    id: FolderId,
    body: RenameFolderBody,
}

impl RenameFolder {
    pub fn mount_point<M>(id: FolderId, mountpoint: M) -> Self
    where
        M: Into<String>,
    {
        RenameFolder {
            id,
            body: RenameFolderBody {
                mountpoint: mountpoint.into(),
            },
        }
    }

    pub fn send(self, client: &ApiClient) -> Result<(), RequestError> {
        let res = client.post(format!("{}/{}/mountpoint", FOLDERS_API, self.id))
            .json(&self.body)
            .send()?;

        match res.status() {
            reqwest::StatusCode::OK => expect_success(res),
            _ => Err(error_body(res)),
        }
    }
}

pub struct SetAdvancedPermissions {
    id: FolderId,
    enabled: bool,
}

impl SetAdvancedPermissions {
    pub fn enable(id: FolderId) -> Self {
        SetAdvancedPermissions { id, enabled: true }
    }

    pub fn disable(id: FolderId) -> Self {
        SetAdvancedPermissions { id, enabled: false }
    }

    pub fn send(self, client: &ApiClient) -> Result<(), RequestError> {
        // the toggle rides as a bare path segment, not a body field
        let flag = if self.enabled { 1 } else { 0 };
        let res = client.post(format!("{}/{}/{}", FOLDERS_API, self.id, flag)).send()?;

        match res.status() {
            reqwest::StatusCode::OK => expect_success(res),
            _ => Err(error_body(res)),
        }
    }
}

pub struct AddManageGroup {
    id: FolderId,
    body: ManageAclBody,
}

impl AddManageGroup {
    pub fn group<G>(id: FolderId, group: G) -> Self
    where
        G: Into<GroupId>,
    {
        AddManageGroup {
            id,
            body: ManageAclBody {
                manage_acl: true,
                mapping_id: group.into(),
                mapping_type: MappingType::Group,
            },
        }
    }

    pub fn send(self, client: &ApiClient) -> Result<(), RequestError> {
        let res = client.post(format!("{}/{}/manageACL", FOLDERS_API, self.id))
            .json(&self.body)
            .send()?;

        match res.status() {
            reqwest::StatusCode::OK => expect_success(res),
            _ => Err(error_body(res)),
        }
    }
}

pub struct RemoveManageGroup {
    id: FolderId,
    body: ManageAclBody,
}

impl RemoveManageGroup {
    pub fn group<G>(id: FolderId, group: G) -> Self
    where
        G: Into<GroupId>,
    {
        RemoveManageGroup {
            id,
            body: ManageAclBody {
                manage_acl: false,
                mapping_id: group.into(),
                mapping_type: MappingType::Group,
            },
        }
    }

    pub fn send(self, client: &ApiClient) -> Result<(), RequestError> {
        let res = client.post(format!("{}/{}/manageACL", FOLDERS_API, self.id))
            .json(&self.body)
            .send()?;

        match res.status() {
            reqwest::StatusCode::OK => expect_success(res),
            _ => Err(error_body(res)),
        }
    }
}

pub struct AddManageUser {
    id: FolderId,
    body: ManageAclBody,
}

impl AddManageUser {
    pub fn user<U>(id: FolderId, user: U) -> Self
    where
        U: Into<UserId>,
    {
        AddManageUser {
            id,
            body: ManageAclBody {
                manage_acl: true,
                mapping_id: user.into(),
                mapping_type: MappingType::User,
            },
        }
    }

    pub fn send(self, client: &ApiClient) -> Result<(), RequestError> {
        let res = client.post(format!("{}/{}/manageACL", FOLDERS_API, self.id))
            .json(&self.body)
            .send()?;

        match res.status() {
            reqwest::StatusCode::OK => expect_success(res),
            _ => Err(error_body(res)),
        }
    }
}

pub struct RemoveManageUser {
    id: FolderId,
    body: ManageAclBody,
}

impl RemoveManageUser {
    pub fn user<U>(id: FolderId, user: U) -> Self
    where
        U: Into<UserId>,
    {
        RemoveManageUser {
            id,
            body: ManageAclBody {
                manage_acl: false,
                mapping_id: user.into(),
                mapping_type: MappingType::User,
            },
        }
    }

    pub fn send(self, client: &ApiClient) -> Result<(), RequestError> {
        let res = client.post(format!("{}/{}/manageACL", FOLDERS_API, self.id))
            .json(&self.body)
            .send()?;

        match res.status() {
            reqwest::StatusCode::OK => expect_success(res),
            _ => Err(error_body(res)),
        }
    }
}

use std::net::SocketAddr;

use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use groupfolders_api::client::folders::{
    AddManageGroup,
    AddManageUser,
    CreateFolder,
    DeleteFolder,
    GrantGroup,
    QueryFolders,
    RemoveManageGroup,
    RemoveManageUser,
    RenameFolder,
    RetrieveFolder,
    RevokeGroup,
    SetAdvancedPermissions,
    SetGroupPermission,
    SetQuota,
};
use groupfolders_api::client::ApiClient;
use groupfolders_api::folders::{Permission, Quota};

fn connect(addr: SocketAddr) -> ApiClient {
    let mut builder = ApiClient::builder();
    builder.host(addr.ip().to_string());
    builder.port(Some(addr.port()));
    builder.login("admin", "app-password");

    builder.build().expect("failed to build client")
}

fn ok_body(data: serde_json::Value) -> serde_json::Value {
    json!({
        "ocs": {
            "meta": {"status": "ok", "statuscode": 100, "message": "OK"},
            "data": data
        }
    })
}

fn failure_body(statuscode: u16, message: &str) -> serde_json::Value {
    json!({
        "ocs": {
            "meta": {"status": "failure", "statuscode": statuscode, "message": message},
            "data": []
        }
    })
}

#[tokio::test]
async fn query_folders_returns_configured_folders() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/apps/groupfolders/folders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!({
            "1": {
                "id": 1,
                "mount_point": "projects",
                "groups": {"admin": 31},
                "quota": -3,
                "size": 4096,
                "acl": false
            },
            "2": {
                "id": 2,
                "mount_point": "archive",
                "groups": [],
                "quota": 10737418240i64,
                "size": 0,
                "acl": true
            }
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let addr = *server.address();

    tokio::task::spawn_blocking(move || {
        let client = connect(addr);
        let list = QueryFolders::new().send(&client).unwrap();

        assert_eq!(list.len(), 2);

        let projects = list.get(1).unwrap();
        assert_eq!(projects.mount_point, "projects");
        assert_eq!(projects.groups.get("admin"), Some(&Permission::ALL));
        assert_eq!(projects.quota, Quota::Unlimited);

        let archive = list.get(2).unwrap();
        assert!(archive.groups.is_empty());
        assert_eq!(archive.quota, Quota::Bytes(10737418240));
        assert!(archive.acl);
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn retrieve_folder_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/apps/groupfolders/folders/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!({
            "id": 5,
            "mount_point": "shared",
            "groups": {"staff": 3},
            "quota": 1024,
            "size": 512,
            "acl": false
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let addr = *server.address();

    tokio::task::spawn_blocking(move || {
        let client = connect(addr);
        let folder = RetrieveFolder::id(5).send(&client).unwrap().unwrap();

        assert_eq!(folder.id, 5);
        assert_eq!(folder.mount_point, "shared");
        assert_eq!(
            folder.groups.get("staff"),
            Some(&(Permission::READ | Permission::UPDATE))
        );
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn retrieve_missing_folder_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/apps/groupfolders/folders/99"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let addr = *server.address();

    tokio::task::spawn_blocking(move || {
        let client = connect(addr);
        let folder = RetrieveFolder::id(99).send(&client).unwrap();

        assert!(folder.is_none());
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn create_folder_posts_mountpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/apps/groupfolders/folders"))
        .and(body_json(json!({"mountpoint": "shared"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!({"id": 7}))))
        .expect(1)
        .mount(&server)
        .await;

    let addr = *server.address();

    tokio::task::spawn_blocking(move || {
        let client = connect(addr);
        let created = CreateFolder::mount_point("shared").send(&client).unwrap();

        assert_eq!(created.id, 7);
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn delete_folder_issues_delete() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/apps/groupfolders/folders/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let addr = *server.address();

    tokio::task::spawn_blocking(move || {
        let client = connect(addr);

        DeleteFolder::id(5).send(&client).unwrap();
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn grant_group_posts_group_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/apps/groupfolders/folders/5/groups"))
        .and(body_json(json!({"group": "admin"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let addr = *server.address();

    tokio::task::spawn_blocking(move || {
        let client = connect(addr);

        GrantGroup::group(5, "admin").send(&client).unwrap();
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn revoke_group_deletes_group_segment() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/apps/groupfolders/folders/5/groups/admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let addr = *server.address();

    tokio::task::spawn_blocking(move || {
        let client = connect(addr);

        RevokeGroup::group(5, "admin").send(&client).unwrap();
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn set_group_permission_posts_bitmask() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/apps/groupfolders/folders/5/groups/staff"))
        .and(body_json(json!({"permissions": 31})))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let addr = *server.address();

    tokio::task::spawn_blocking(move || {
        let client = connect(addr);

        SetGroupPermission::group(5, "staff", Permission::ALL)
            .send(&client)
            .unwrap();
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn set_quota_posts_sentinel_and_bytes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/apps/groupfolders/folders/5/quota"))
        .and(body_json(json!({"quota": -3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/apps/groupfolders/folders/6/quota"))
        .and(body_json(json!({"quota": 1024})))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let addr = *server.address();

    tokio::task::spawn_blocking(move || {
        let client = connect(addr);

        SetQuota::unlimited(5).send(&client).unwrap();
        SetQuota::quota(6, 1024i64).send(&client).unwrap();
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn rename_folder_posts_mountpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/apps/groupfolders/folders/5/mountpoint"))
        .and(body_json(json!({"mountpoint": "archive"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let addr = *server.address();

    tokio::task::spawn_blocking(move || {
        let client = connect(addr);

        RenameFolder::mount_point(5, "archive").send(&client).unwrap();
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn advanced_permissions_toggle_paths() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/apps/groupfolders/folders/5/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/apps/groupfolders/folders/5/0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let addr = *server.address();

    tokio::task::spawn_blocking(move || {
        let client = connect(addr);

        SetAdvancedPermissions::enable(5).send(&client).unwrap();
        SetAdvancedPermissions::disable(5).send(&client).unwrap();
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn manage_user_add_and_remove() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/apps/groupfolders/folders/5/manageACL"))
        .and(body_json(json!({
            "manageACL": 1,
            "mappingId": "alice",
            "mappingType": "user"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/apps/groupfolders/folders/5/manageACL"))
        .and(body_json(json!({
            "manageACL": 0,
            "mappingId": "alice",
            "mappingType": "user"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let addr = *server.address();

    tokio::task::spawn_blocking(move || {
        let client = connect(addr);

        AddManageUser::user(5, "alice").send(&client).unwrap();
        RemoveManageUser::user(5, "alice").send(&client).unwrap();
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn manage_group_mapping_discriminator() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/apps/groupfolders/folders/5/manageACL"))
        .and(body_json(json!({
            "manageACL": 1,
            "mappingId": "admin",
            "mappingType": "group"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/apps/groupfolders/folders/5/manageACL"))
        .and(body_json(json!({
            "manageACL": 0,
            "mappingId": "admin",
            "mappingType": "group"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let addr = *server.address();

    tokio::task::spawn_blocking(move || {
        let client = connect(addr);

        AddManageGroup::group(5, "admin").send(&client).unwrap();
        RemoveManageGroup::group(5, "admin").send(&client).unwrap();
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn ocs_failure_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/apps/groupfolders/folders/5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(failure_body(404, "Folder not found")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let addr = *server.address();

    tokio::task::spawn_blocking(move || {
        let client = connect(addr);

        let err = DeleteFolder::id(5).send(&client).unwrap_err();
        let ocs = err.as_ocs().unwrap();

        assert_eq!(ocs.statuscode(), 404);
        assert_eq!(ocs.message(), Some("Folder not found"));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn http_error_parses_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/apps/groupfolders/folders"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(failure_body(997, "Unauthorised")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let addr = *server.address();

    tokio::task::spawn_blocking(move || {
        let client = connect(addr);

        let err = CreateFolder::mount_point("shared").send(&client).unwrap_err();
        let ocs = err.as_ocs().unwrap();

        assert_eq!(ocs.statuscode(), 997);
        assert_eq!(ocs.status(), "failure");
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn identical_sends_produce_identical_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/apps/groupfolders/folders/5/quota"))
        .and(body_json(json!({"quota": -3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!([]))))
        .expect(2)
        .mount(&server)
        .await;

    let addr = *server.address();

    tokio::task::spawn_blocking(move || {
        let client = connect(addr);

        SetQuota::unlimited(5).send(&client).unwrap();
        SetQuota::unlimited(5).send(&client).unwrap();
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn requests_carry_session_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/apps/groupfolders/folders"))
        .and(header("OCS-APIRequest", "true"))
        .and(header("Accept", "application/json"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let addr = *server.address();

    tokio::task::spawn_blocking(move || {
        let client = connect(addr);
        let list = QueryFolders::new().send(&client).unwrap();

        assert!(list.is_empty());
    })
    .await
    .unwrap();
}

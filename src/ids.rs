pub type FolderId = i64;
pub type GroupId = String;
pub type UserId = String;

use serde::{Deserialize, Serialize};

use super::{Chat, ChatInviteLink, ChatPermissions, User};

/// A member's status in a chat, tagged by `status`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChatMember {
    Creator {
        user: User,
        is_anonymous: bool,
        custom_title: Option<String>,
    },
    Administrator(ChatMemberAdministrator),
    Member {
        user: User,
        until_date: Option<i64>,
    },
    Restricted(ChatMemberRestricted),
    Left {
        user: User,
    },
    Kicked {
        user: User,
        until_date: i64,
    },
}

impl ChatMember {
    pub fn user(&self) -> &User {
        match self {
            ChatMember::Administrator(admin) => &admin.user,
            ChatMember::Restricted(restricted) => &restricted.user,
            ChatMember::Creator { user, .. }
            | ChatMember::Member { user, .. }
            | ChatMember::Left { user }
            | ChatMember::Kicked { user, .. } => user,
        }
    }

    /// Whether the user is currently inside the chat.
    pub fn is_present(&self) -> bool {
        match self {
            ChatMember::Creator { .. } | ChatMember::Administrator(_) | ChatMember::Member { .. } => {
                true
            }
            ChatMember::Restricted(restricted) => restricted.is_member,
            ChatMember::Left { .. } | ChatMember::Kicked { .. } => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatMemberAdministrator {
    pub user: User,
    pub can_be_edited: bool,
    #[serde(flatten)]
    pub rights: ChatAdministratorRights,
    pub custom_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatMemberRestricted {
    pub user: User,
    pub is_member: bool,
    #[serde(flatten)]
    pub permissions: ChatPermissions,
    pub until_date: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ChatAdministratorRights {
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default)]
    pub can_manage_chat: bool,
    #[serde(default)]
    pub can_delete_messages: bool,
    #[serde(default)]
    pub can_manage_video_chats: bool,
    #[serde(default)]
    pub can_restrict_members: bool,
    #[serde(default)]
    pub can_promote_members: bool,
    #[serde(default)]
    pub can_change_info: bool,
    #[serde(default)]
    pub can_invite_users: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_post_messages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_edit_messages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_pin_messages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_manage_topics: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatMemberUpdated {
    pub chat: Chat,
    pub from: User,
    pub date: i64,
    pub old_chat_member: ChatMember,
    pub new_chat_member: ChatMember,
    pub invite_link: Option<ChatInviteLink>,
    pub via_join_request: Option<bool>,
    pub via_chat_folder_invite_link: Option<bool>,
}

impl ChatMemberUpdated {
    /// True when the member moved from outside the chat to inside it.
    pub fn joined(&self) -> bool {
        !self.old_chat_member.is_present() && self.new_chat_member.is_present()
    }
}

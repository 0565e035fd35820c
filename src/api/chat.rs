use crate::types::{ChatFullInfo, ChatId, ChatInviteLink, ChatMember, ChatPermissions};

params! {
    BanChatMember {
        chat_id: ChatId,
        user_id: i64,
    } optional {
        /// Unix time; less than 30 seconds or more than 366 days away means forever.
        until_date: i64,
        revoke_messages: bool,
    }
}

params! {
    UnbanChatMember {
        chat_id: ChatId,
        user_id: i64,
    } optional {
        only_if_banned: bool,
    }
}

params! {
    RestrictChatMember {
        chat_id: ChatId,
        user_id: i64,
        permissions: ChatPermissions,
    } optional {
        use_independent_chat_permissions: bool,
        until_date: i64,
    }
}

params! {
    /// Pass every right as `false` to demote.
    PromoteChatMember {
        chat_id: ChatId,
        user_id: i64,
    } optional {
        is_anonymous: bool,
        can_manage_chat: bool,
        can_delete_messages: bool,
        can_manage_video_chats: bool,
        can_restrict_members: bool,
        can_promote_members: bool,
        can_change_info: bool,
        can_invite_users: bool,
        can_post_messages: bool,
        can_edit_messages: bool,
        can_pin_messages: bool,
        can_manage_topics: bool,
    }
}

params! {
    SetChatAdministratorCustomTitle {
        chat_id: ChatId,
        user_id: i64,
        custom_title: String,
    }
}

params! {
    BanChatSenderChat {
        chat_id: ChatId,
        sender_chat_id: i64,
    }
}

params! {
    UnbanChatSenderChat {
        chat_id: ChatId,
        sender_chat_id: i64,
    }
}

params! {
    SetChatPermissions {
        chat_id: ChatId,
        permissions: ChatPermissions,
    } optional {
        use_independent_chat_permissions: bool,
    }
}

params! {
    ExportChatInviteLink {
        chat_id: ChatId,
    }
}

params! {
    CreateChatInviteLink {
        chat_id: ChatId,
    } optional {
        name: String,
        expire_date: i64,
        member_limit: i64,
        creates_join_request: bool,
    }
}

params! {
    EditChatInviteLink {
        chat_id: ChatId,
        invite_link: String,
    } optional {
        name: String,
        expire_date: i64,
        member_limit: i64,
        creates_join_request: bool,
    }
}

params! {
    RevokeChatInviteLink {
        chat_id: ChatId,
        invite_link: String,
    }
}

params! {
    ApproveChatJoinRequest {
        chat_id: ChatId,
        user_id: i64,
    }
}

params! {
    DeclineChatJoinRequest {
        chat_id: ChatId,
        user_id: i64,
    }
}

params! {
    SetChatTitle {
        chat_id: ChatId,
        title: String,
    }
}

params! {
    SetChatDescription {
        chat_id: ChatId,
    } optional {
        description: String,
    }
}

params! {
    PinChatMessage {
        chat_id: ChatId,
        message_id: i64,
    } optional {
        disable_notification: bool,
    }
}

params! {
    /// Without `message_id` the most recent pinned message is unpinned.
    UnpinChatMessage {
        chat_id: ChatId,
    } optional {
        message_id: i64,
    }
}

params! {
    UnpinAllChatMessages {
        chat_id: ChatId,
    }
}

params! {
    LeaveChat {
        chat_id: ChatId,
    }
}

params! {
    GetChat {
        chat_id: ChatId,
    }
}

params! {
    GetChatAdministrators {
        chat_id: ChatId,
    }
}

params! {
    GetChatMemberCount {
        chat_id: ChatId,
    }
}

params! {
    GetChatMember {
        chat_id: ChatId,
        user_id: i64,
    }
}

params! {
    SetChatStickerSet {
        chat_id: ChatId,
        sticker_set_name: String,
    }
}

params! {
    DeleteChatStickerSet {
        chat_id: ChatId,
    }
}

api_methods! {
    fn ban_chat_member("banChatMember", BanChatMember) -> bool;
    fn unban_chat_member("unbanChatMember", UnbanChatMember) -> bool;
    fn restrict_chat_member("restrictChatMember", RestrictChatMember) -> bool;
    fn promote_chat_member("promoteChatMember", PromoteChatMember) -> bool;
    fn set_chat_administrator_custom_title(
        "setChatAdministratorCustomTitle",
        SetChatAdministratorCustomTitle
    ) -> bool;
    fn ban_chat_sender_chat("banChatSenderChat", BanChatSenderChat) -> bool;
    fn unban_chat_sender_chat("unbanChatSenderChat", UnbanChatSenderChat) -> bool;
    fn set_chat_permissions("setChatPermissions", SetChatPermissions) -> bool;
    /// Revokes the previous primary link.
    fn export_chat_invite_link("exportChatInviteLink", ExportChatInviteLink) -> String;
    fn create_chat_invite_link("createChatInviteLink", CreateChatInviteLink) -> ChatInviteLink;
    fn edit_chat_invite_link("editChatInviteLink", EditChatInviteLink) -> ChatInviteLink;
    fn revoke_chat_invite_link("revokeChatInviteLink", RevokeChatInviteLink) -> ChatInviteLink;
    fn approve_chat_join_request("approveChatJoinRequest", ApproveChatJoinRequest) -> bool;
    fn decline_chat_join_request("declineChatJoinRequest", DeclineChatJoinRequest) -> bool;
    fn set_chat_title("setChatTitle", SetChatTitle) -> bool;
    fn set_chat_description("setChatDescription", SetChatDescription) -> bool;
    fn pin_chat_message("pinChatMessage", PinChatMessage) -> bool;
    fn unpin_chat_message("unpinChatMessage", UnpinChatMessage) -> bool;
    fn unpin_all_chat_messages("unpinAllChatMessages", UnpinAllChatMessages) -> bool;
    fn leave_chat("leaveChat", LeaveChat) -> bool;
    fn get_chat("getChat", GetChat) -> ChatFullInfo;
    fn get_chat_administrators("getChatAdministrators", GetChatAdministrators) -> Vec<ChatMember>;
    fn get_chat_member_count("getChatMemberCount", GetChatMemberCount) -> i64;
    fn get_chat_member("getChatMember", GetChatMember) -> ChatMember;
    fn set_chat_sticker_set("setChatStickerSet", SetChatStickerSet) -> bool;
    fn delete_chat_sticker_set("deleteChatStickerSet", DeleteChatStickerSet) -> bool;
}

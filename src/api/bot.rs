use crate::types::{
    BotCommand, BotCommandScope, BotDescription, BotName, BotShortDescription, MenuButton, Update,
    User,
};

params! {
    GetUpdates {} optional {
        offset: i64,
        limit: i64,
        timeout: i64,
        allowed_updates: Vec<String>,
    }
}

params! {
    SetMyCommands {
        commands: Vec<BotCommand>,
    } optional {
        scope: BotCommandScope,
        language_code: String,
    }
}

params! {
    DeleteMyCommands {} optional {
        scope: BotCommandScope,
        language_code: String,
    }
}

params! {
    GetMyCommands {} optional {
        scope: BotCommandScope,
        language_code: String,
    }
}

params! {
    /// Passing no name removes the name for the given language.
    SetMyName {} optional {
        name: String,
        language_code: String,
    }
}

params! {
    GetMyName {} optional {
        language_code: String,
    }
}

params! {
    SetMyDescription {} optional {
        description: String,
        language_code: String,
    }
}

params! {
    GetMyDescription {} optional {
        language_code: String,
    }
}

params! {
    SetMyShortDescription {} optional {
        short_description: String,
        language_code: String,
    }
}

params! {
    GetMyShortDescription {} optional {
        language_code: String,
    }
}

params! {
    SetChatMenuButton {} optional {
        chat_id: i64,
        menu_button: MenuButton,
    }
}

params! {
    GetChatMenuButton {} optional {
        chat_id: i64,
    }
}

api_methods! {
    fn get_me("getMe") -> User;
    /// Log out from the cloud Bot API server before moving to a local one.
    fn log_out("logOut") -> bool;
    fn close("close") -> bool;
    /// Long polling. Fails while a webhook is set.
    fn get_updates("getUpdates", GetUpdates) -> Vec<Update>;
    fn set_my_commands("setMyCommands", SetMyCommands) -> bool;
    fn delete_my_commands("deleteMyCommands", DeleteMyCommands) -> bool;
    fn get_my_commands("getMyCommands", GetMyCommands) -> Vec<BotCommand>;
    fn set_my_name("setMyName", SetMyName) -> bool;
    fn get_my_name("getMyName", GetMyName) -> BotName;
    fn set_my_description("setMyDescription", SetMyDescription) -> bool;
    fn get_my_description("getMyDescription", GetMyDescription) -> BotDescription;
    fn set_my_short_description("setMyShortDescription", SetMyShortDescription) -> bool;
    fn get_my_short_description("getMyShortDescription", GetMyShortDescription) -> BotShortDescription;
    fn set_chat_menu_button("setChatMenuButton", SetChatMenuButton) -> bool;
    fn get_chat_menu_button("getChatMenuButton", GetChatMenuButton) -> MenuButton;
}

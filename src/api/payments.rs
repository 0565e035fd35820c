use crate::types::{
    ChatId, InlineKeyboardMarkup, LabeledPrice, Message, ReplyParameters, ShippingOption,
};

params! {
    /// Amounts are in the smallest currency unit. Use currency `XTR` with an
    /// empty `provider_token` for Telegram Stars.
    SendInvoice {
        chat_id: ChatId,
        title: String,
        description: String,
        payload: String,
        currency: String,
        prices: Vec<LabeledPrice>,
    } optional {
        message_thread_id: i64,
        provider_token: String,
        max_tip_amount: i64,
        suggested_tip_amounts: Vec<i64>,
        start_parameter: String,
        provider_data: String,
        photo_url: String,
        need_name: bool,
        need_phone_number: bool,
        need_email: bool,
        need_shipping_address: bool,
        is_flexible: bool,
        disable_notification: bool,
        protect_content: bool,
        reply_parameters: ReplyParameters,
        reply_markup: InlineKeyboardMarkup,
    }
}

params! {
    CreateInvoiceLink {
        title: String,
        description: String,
        payload: String,
        currency: String,
        prices: Vec<LabeledPrice>,
    } optional {
        provider_token: String,
        subscription_period: i64,
        max_tip_amount: i64,
        suggested_tip_amounts: Vec<i64>,
        provider_data: String,
        photo_url: String,
        need_name: bool,
        need_phone_number: bool,
        need_email: bool,
        need_shipping_address: bool,
        is_flexible: bool,
    }
}

params! {
    /// `shipping_options` is required when `ok` is true, `error_message`
    /// when it is false.
    AnswerShippingQuery {
        shipping_query_id: String,
        ok: bool,
    } optional {
        shipping_options: Vec<ShippingOption>,
        error_message: String,
    }
}

params! {
    /// Must be answered within 10 seconds.
    AnswerPreCheckoutQuery {
        pre_checkout_query_id: String,
        ok: bool,
    } optional {
        error_message: String,
    }
}

api_methods! {
    fn send_invoice("sendInvoice", SendInvoice) -> Message;
    fn create_invoice_link("createInvoiceLink", CreateInvoiceLink) -> String;
    fn answer_shipping_query("answerShippingQuery", AnswerShippingQuery) -> bool;
    fn answer_pre_checkout_query("answerPreCheckoutQuery", AnswerPreCheckoutQuery) -> bool;
}

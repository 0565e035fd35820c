use crate::types::{InlineQueryResult, InlineQueryResultsButton};

params! {
    /// Must be sent for every callback query, even with no text, or the
    /// client keeps showing a progress bar.
    AnswerCallbackQuery {
        callback_query_id: String,
    } optional {
        text: String,
        show_alert: bool,
        url: String,
        cache_time: i64,
    }
}

params! {
    /// At most 50 results per query.
    AnswerInlineQuery {
        inline_query_id: String,
        results: Vec<InlineQueryResult>,
    } optional {
        cache_time: i64,
        is_personal: bool,
        next_offset: String,
        button: InlineQueryResultsButton,
    }
}

api_methods! {
    fn answer_callback_query("answerCallbackQuery", AnswerCallbackQuery) -> bool;
    fn answer_inline_query("answerInlineQuery", AnswerInlineQuery) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTelegram;
    use crate::types::InlineQueryResultArticle;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_answer_inline_query_encodes_results() {
        let fake = FakeTelegram::start().await;
        let api = fake.api("TOKEN");

        let results = vec![InlineQueryResult::Article(InlineQueryResultArticle::text(
            "1", "Echo", "hi there",
        ))];
        api.answer_inline_query(&AnswerInlineQuery::new("q-1", results).cache_time(0i64))
            .await
            .unwrap();

        let call = &fake.calls_to("answerInlineQuery")[0];
        assert_eq!(call.query["inline_query_id"], "q-1");
        assert_eq!(call.query["cache_time"], "0");
        let results: Value = serde_json::from_str(&call.query["results"]).unwrap();
        assert_eq!(results[0]["type"], "article");
        assert_eq!(
            results[0]["input_message_content"],
            json!({"message_text": "hi there"})
        );
    }
}

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::json;

use wayfarer::application::ports::{ChatClient, ChatClientError, ChatOptions, ChatReply};
use wayfarer::application::services::{
    CurrencyError, CurrencyService, market_snapshot, parse_conversion,
};

struct CannedChatClient {
    answer: String,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ChatClient for CannedChatClient {
    async fn send_message(
        &self,
        _message: &str,
        _flow_id: &str,
        _options: &ChatOptions,
    ) -> Result<ChatReply, ChatClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ChatReply {
            answer: self.answer.clone(),
            raw: json!({}),
        })
    }

    async fn send_image(
        &self,
        _image: &[u8],
        _mime_type: &str,
        _flow_id: &str,
        _prompt: &str,
    ) -> Result<ChatReply, ChatClientError> {
        unreachable!("currency conversion never sends images")
    }

    async fn list_flows(&self) -> Result<serde_json::Value, ChatClientError> {
        Ok(json!([]))
    }

    async fn ping(&self) -> Result<(), ChatClientError> {
        Ok(())
    }
}

fn service(answer: &str) -> (CurrencyService<CannedChatClient>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let client = Arc::new(CannedChatClient {
        answer: answer.to_string(),
        calls: Arc::clone(&calls),
    });
    (
        CurrencyService::new(client, "currency-flow".to_string()),
        calls,
    )
}

#[tokio::test]
async fn given_negative_amount_when_converting_then_rejected_without_provider_call() {
    let (service, calls) = service("irrelevant");

    let result = service.convert(-5.0, "USD", "EUR").await;

    assert!(matches!(result, Err(CurrencyError::InvalidInput(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_unknown_currency_code_when_converting_then_rejected_without_provider_call() {
    let (service, calls) = service("irrelevant");

    let result = service.convert(10.0, "USD", "ABC").await;

    match result {
        Err(CurrencyError::InvalidInput(message)) => assert!(message.contains("ABC")),
        other => panic!("expected invalid input, got {:?}", other.map(|_| ())),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_lowercase_codes_when_converting_then_codes_are_uppercased() {
    let answer = json!({"convertedAmount": 92.5, "conversionRate": 0.925}).to_string();
    let (service, _) = service(&answer);

    let conversion = service.convert(100.0, "usd", "eur").await.unwrap();

    assert_eq!(conversion.from_currency, "USD");
    assert_eq!(conversion.to_currency, "EUR");
    assert_eq!(conversion.parsed.unwrap().converted_amount, 92.5);
}

#[tokio::test]
async fn given_unparsable_answer_when_converting_then_raw_text_is_still_returned() {
    let (service, _) = service("I cannot provide exchange rates right now.");

    let conversion = service.convert(100.0, "USD", "EUR").await.unwrap();

    assert!(conversion.parsed.is_none());
    assert_eq!(
        conversion.ai_response,
        "I cannot provide exchange rates right now."
    );
}

#[tokio::test]
async fn given_malformed_base_code_when_requesting_rates_then_rejected_without_provider_call() {
    let (service, calls) = service("irrelevant");

    let result = service.exchange_rates("EURO", &[]).await;

    assert!(matches!(result, Err(CurrencyError::InvalidInput(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_no_targets_when_requesting_rates_then_first_ten_supported_codes_are_used() {
    let (service, _) = service("rates vary");

    let insight = service.exchange_rates("USD", &[]).await.unwrap();

    assert_eq!(insight.base_currency, "USD");
    assert_eq!(insight.target_currencies.len(), 10);
    assert_eq!(insight.target_currencies[0], "USD");
    assert_eq!(insight.ai_response, "rates vary");
}

#[tokio::test]
async fn given_invalid_target_code_when_requesting_insights_then_error_names_the_code() {
    let (service, calls) = service("irrelevant");

    let result = service
        .market_insights("USD", &["EUR".to_string(), "12".to_string()])
        .await;

    match result {
        Err(CurrencyError::InvalidInput(message)) => assert!(message.contains("12")),
        other => panic!("expected invalid input, got {:?}", other.map(|_| ())),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn given_weekday_market_hours_when_snapshotting_then_markets_are_open_and_volatile() {
    // Wednesday 10:00 UTC
    let now = Utc.with_ymd_and_hms(2026, 8, 26, 10, 0, 0).unwrap();

    let snapshot = market_snapshot(now);

    assert_eq!(snapshot.market_context, "Markets Open - High Activity");
    assert_eq!(snapshot.volatility, "high");
    assert_eq!(snapshot.time_context, "Market Hours (Active Trading) - Weekday");
}

#[test]
fn given_weekday_evening_when_snapshotting_then_volatility_is_medium() {
    // Wednesday 18:00 UTC
    let now = Utc.with_ymd_and_hms(2026, 8, 26, 18, 0, 0).unwrap();

    let snapshot = market_snapshot(now);

    assert_eq!(snapshot.market_context, "Markets Closed - Low Activity");
    assert_eq!(snapshot.volatility, "medium");
    assert_eq!(snapshot.time_context, "After Hours Trading - Weekday");
}

#[test]
fn given_sunday_when_snapshotting_then_markets_are_closed_for_the_weekend() {
    let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();

    let snapshot = market_snapshot(now);

    assert_eq!(snapshot.market_context, "Markets Closed - Weekend");
    assert_eq!(snapshot.volatility, "low");
    assert!(snapshot.time_context.ends_with("Sunday (Market Closed)"));
}

#[test]
fn given_json_answer_with_numeric_fields_when_parsing_then_both_values_are_read() {
    let answer = json!({"convertedAmount": 95.24, "conversionRate": 0.9524}).to_string();

    let parsed = parse_conversion(&answer).unwrap();

    assert_eq!(parsed.converted_amount, 95.24);
    assert_eq!(parsed.conversion_rate, 0.9524);
}

#[test]
fn given_json_answer_with_string_fields_when_parsing_then_values_are_coerced() {
    let answer = json!({"convertedAmount": "95.24", "conversionRate": "0.9524"}).to_string();

    let parsed = parse_conversion(&answer).unwrap();

    assert_eq!(parsed.converted_amount, 95.24);
}

#[test]
fn given_plain_text_equation_when_parsing_then_rate_is_derived() {
    let parsed = parse_conversion("Sure! 100 USD = 95.24 EUR at today's rate.").unwrap();

    assert_eq!(parsed.converted_amount, 95.24);
    assert!((parsed.conversion_rate - 0.9524).abs() < 1e-9);
}

#[test]
fn given_prose_without_numbers_when_parsing_then_returns_none() {
    assert!(parse_conversion("Exchange rates vary by provider.").is_none());
}

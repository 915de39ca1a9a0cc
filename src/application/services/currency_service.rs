use std::sync::Arc;
use std::sync::OnceLock;

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use regex::Regex;

use crate::application::ports::{ChatClient, ChatClientError, ChatOptions};

/// Currency codes the conversion endpoint accepts.
pub const SUPPORTED_CURRENCIES: &[&str] = &[
    "USD", "EUR", "GBP", "JPY", "AUD", "CAD", "CHF", "CNY", "SEK", "NZD", "MXN", "SGD", "HKD",
    "NOK", "TRY", "RUB", "INR", "BRL", "ZAR", "KRW", "AED", "SAR", "QAR", "KWD", "BHD", "OMR",
    "JOD", "LBP", "EGP", "MAD", "TND", "DZD", "LYD", "SDG", "ETB", "KES", "UGX", "TZS", "ZMW",
    "BWP", "NAD", "SZL", "LSL", "MZN", "AOA", "XOF", "XAF", "CDF", "RWF", "BIF",
];

#[derive(Debug, Clone)]
pub struct CurrencyConversion {
    pub original_amount: f64,
    pub from_currency: String,
    pub to_currency: String,
    pub ai_response: String,
    pub parsed: Option<ParsedConversion>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedConversion {
    pub converted_amount: f64,
    pub conversion_rate: f64,
}

/// Trading-session context attached to rate and insight responses.
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
    pub time_context: String,
    pub market_context: String,
    pub volatility: &'static str,
}

#[derive(Debug, Clone)]
pub struct CurrencyInsight {
    pub base_currency: String,
    pub target_currencies: Vec<String>,
    pub ai_response: String,
    pub snapshot: MarketSnapshot,
}

/// AI-backed currency conversion through a dedicated flow.
pub struct CurrencyService<C>
where
    C: ChatClient,
{
    chat_client: Arc<C>,
    flow_id: String,
}

impl<C> CurrencyService<C>
where
    C: ChatClient,
{
    pub fn new(chat_client: Arc<C>, flow_id: String) -> Self {
        Self {
            chat_client,
            flow_id,
        }
    }

    pub async fn convert(
        &self,
        amount: f64,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<CurrencyConversion, CurrencyError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CurrencyError::InvalidInput(
                "amount must be a non-negative number".to_string(),
            ));
        }

        let from = from_currency.to_uppercase();
        let to = to_currency.to_uppercase();
        for code in [&from, &to] {
            if !SUPPORTED_CURRENCIES.contains(&code.as_str()) {
                return Err(CurrencyError::InvalidInput(format!(
                    "Unsupported currency code: {}",
                    code
                )));
            }
        }

        let prompt = conversion_prompt(amount, &from, &to);
        let reply = self
            .chat_client
            .send_message(&prompt, &self.flow_id, &ChatOptions::default())
            .await
            .map_err(CurrencyError::Upstream)?;

        let parsed = parse_conversion(&reply.answer);
        if parsed.is_none() {
            tracing::debug!("Currency answer had no parsable conversion, returning raw text only");
        }

        Ok(CurrencyConversion {
            original_amount: amount,
            from_currency: from,
            to_currency: to,
            ai_response: reply.answer,
            parsed,
        })
    }

    /// Rates for a base currency against a target list. An empty target list
    /// falls back to the first ten supported codes.
    pub async fn exchange_rates(
        &self,
        base_currency: &str,
        target_currencies: &[String],
    ) -> Result<CurrencyInsight, CurrencyError> {
        let base = validated_code(base_currency)?;
        let targets = validated_targets(target_currencies)?;

        let now = Utc::now();
        let prompt = format!(
            "Get exchange rates for {base} to: {targets}. Please respond in JSON format:\n\
             {{\n  \"baseCurrency\": \"{base}\",\n  \"timestamp\": \"{now}\",\n  \
             \"rates\": {{\n    \"EUR\": \"1.05\",\n    \"GBP\": \"0.79\",\n    \
             \"JPY\": \"150.00\"\n  }}\n}}",
            base = base,
            targets = targets.join(", "),
            now = now.to_rfc3339(),
        );

        let reply = self
            .chat_client
            .send_message(&prompt, &self.flow_id, &ChatOptions::default())
            .await
            .map_err(CurrencyError::Upstream)?;

        Ok(CurrencyInsight {
            base_currency: base,
            target_currencies: targets,
            ai_response: reply.answer,
            snapshot: market_snapshot(now),
        })
    }

    /// Background information and current trend for a single currency.
    pub async fn currency_info(&self, currency: &str) -> Result<CurrencyInsight, CurrencyError> {
        let code = validated_code(currency)?;

        let now = Utc::now();
        let prompt = format!(
            "Get information about {code}. Please respond in JSON format:\n\
             {{\n  \"currency\": {{\n    \"code\": \"{code}\",\n    \
             \"name\": \"currency_name\",\n    \"country\": \"issuing_country\"\n  }},\n  \
             \"currentStatus\": {{\n    \"trend\": \"bullish/bearish/stable\",\n    \
             \"volatility\": \"low/medium/high\"\n  }}\n}}",
            code = code,
        );

        let reply = self
            .chat_client
            .send_message(&prompt, &self.flow_id, &ChatOptions::default())
            .await
            .map_err(CurrencyError::Upstream)?;

        Ok(CurrencyInsight {
            base_currency: code,
            target_currencies: Vec::new(),
            ai_response: reply.answer,
            snapshot: market_snapshot(now),
        })
    }

    /// Free-form market analysis seeded with the current trading-session
    /// context.
    pub async fn market_insights(
        &self,
        base_currency: &str,
        target_currencies: &[String],
    ) -> Result<CurrencyInsight, CurrencyError> {
        let base = validated_code(base_currency)?;
        let targets = validated_targets(target_currencies)?;

        let now = Utc::now();
        let snapshot = market_snapshot(now);
        let prompt = format!(
            "You are a real-time market intelligence analyst.\n\n\
             CURRENT MARKET CONTEXT:\n\
             - Time: {now} ({time_context})\n\
             - Market Status: {market_context}\n\
             - Volatility Level: {volatility}\n\
             - Base Currency: {base}\n\
             - Target Currencies: {targets}\n\n\
             Provide comprehensive market insights for {base} and related currencies: \
             current conditions and sentiment, key opportunities and risks, relevant \
             news and economic events, and trading recommendations. Respond in JSON \
             with keys marketOverview, opportunities, news and recommendations.",
            now = now.to_rfc3339(),
            time_context = snapshot.time_context,
            market_context = snapshot.market_context,
            volatility = snapshot.volatility,
            base = base,
            targets = targets.join(", "),
        );

        let reply = self
            .chat_client
            .send_message(&prompt, &self.flow_id, &ChatOptions::default())
            .await
            .map_err(CurrencyError::Upstream)?;

        Ok(CurrencyInsight {
            base_currency: base,
            target_currencies: targets,
            ai_response: reply.answer,
            snapshot,
        })
    }
}

fn validated_code(currency: &str) -> Result<String, CurrencyError> {
    let code = currency.trim().to_uppercase();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code)
    } else {
        Err(CurrencyError::InvalidInput(format!(
            "Invalid currency code: {}. Must be a 3-letter code.",
            currency
        )))
    }
}

fn validated_targets(targets: &[String]) -> Result<Vec<String>, CurrencyError> {
    if targets.is_empty() {
        return Ok(SUPPORTED_CURRENCIES
            .iter()
            .take(10)
            .map(|c| c.to_string())
            .collect());
    }

    let invalid: Vec<&str> = targets
        .iter()
        .filter(|t| validated_code(t).is_err())
        .map(|t| t.as_str())
        .collect();
    if !invalid.is_empty() {
        return Err(CurrencyError::InvalidInput(format!(
            "Invalid target currencies: {}",
            invalid.join(", ")
        )));
    }

    Ok(targets.iter().map(|t| t.trim().to_uppercase()).collect())
}

/// Trading-session context derived from the clock. Session boundaries follow
/// the 09:00-16:00 market window with extended hours either side.
pub fn market_snapshot(now: DateTime<Utc>) -> MarketSnapshot {
    let hour = now.hour();
    let weekday = now.weekday();
    let is_weekday = !matches!(weekday, Weekday::Sat | Weekday::Sun);
    let is_market_hours = (9..16).contains(&hour);

    let session = if is_market_hours {
        "Market Hours (Active Trading)"
    } else if (16..21).contains(&hour) {
        "After Hours Trading"
    } else {
        "Extended Hours/Pre-Market"
    };
    let day = match weekday {
        Weekday::Sun => "Sunday (Market Closed)",
        Weekday::Sat => "Saturday (Market Closed)",
        _ => "Weekday",
    };

    let market_context = if is_weekday && is_market_hours {
        "Markets Open - High Activity"
    } else if is_weekday {
        "Markets Closed - Low Activity"
    } else {
        "Markets Closed - Weekend"
    };

    let volatility = if is_weekday && is_market_hours {
        "high"
    } else if is_weekday && ((16..21).contains(&hour) || (6..9).contains(&hour)) {
        "medium"
    } else {
        "low"
    };

    MarketSnapshot {
        time_context: format!("{} - {}", session, day),
        market_context: market_context.to_string(),
        volatility,
    }
}

fn conversion_prompt(amount: f64, from: &str, to: &str) -> String {
    format!(
        "Convert {amount} {from} to {to}. Please respond in JSON format:\n\
         {{\n  \"originalAmount\": {amount},\n  \"fromCurrency\": \"{from}\",\n  \
         \"toCurrency\": \"{to}\",\n  \"conversionRate\": \"rate_used\",\n  \
         \"convertedAmount\": \"calculated_amount\",\n  \"timestamp\": \"{now}\"\n}}",
        amount = amount,
        from = from,
        to = to,
        now = Utc::now().to_rfc3339(),
    )
}

/// Parse the AI answer: JSON first, then the `"100 USD = 95.24 EUR"` plain-text
/// shape. Returns `None` when neither matches.
pub fn parse_conversion(answer: &str) -> Option<ParsedConversion> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(answer.trim()) {
        if let Some(converted) = number_field(&value, "convertedAmount") {
            let rate = number_field(&value, "conversionRate")
                .or_else(|| number_field(&value, "originalAmount").map(|orig| converted / orig))
                .unwrap_or(0.0);
            return Some(ParsedConversion {
                converted_amount: converted,
                conversion_rate: rate,
            });
        }
    }

    static PLAIN: OnceLock<Regex> = OnceLock::new();
    let re = PLAIN.get_or_init(|| {
        Regex::new(r"(\d+(?:\.\d+)?)\s+([A-Za-z]{3})\s*=\s*(\d+(?:\.\d+)?)\s+([A-Za-z]{3})").unwrap()
    });

    let caps = re.captures(answer)?;
    let original: f64 = caps.get(1)?.as_str().parse().ok()?;
    let converted: f64 = caps.get(3)?.as_str().parse().ok()?;
    if original == 0.0 {
        return None;
    }

    Some(ParsedConversion {
        converted_amount: converted,
        conversion_rate: converted / original,
    })
}

fn number_field(value: &serde_json::Value, field: &str) -> Option<f64> {
    match value.get(field)? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CurrencyError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("conversion request failed: {0}")]
    Upstream(ChatClientError),
}

impl CurrencyError {
    pub fn status_code(&self) -> u16 {
        match self {
            CurrencyError::InvalidInput(_) => 400,
            CurrencyError::Upstream(e) => e.status_code(),
        }
    }
}

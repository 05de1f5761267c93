// src/domain/models.rs
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::{JournalError, JournalResult, ValidationError, ValidationResult};

/// Scheduled economic indicators the analyzer understands.
///
/// Serialized with the human-readable labels the journal has always stored,
/// so existing journal blobs keep deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewsType {
    #[serde(rename = "Non-Farm Payrolls (NFP)")]
    NonFarmPayrolls,
    #[serde(rename = "Consumer Price Index (CPI)")]
    ConsumerPriceIndex,
    #[serde(rename = "Gross Domestic Product (GDP)")]
    GrossDomesticProduct,
    #[serde(rename = "Interest Rate Decision")]
    InterestRateDecision,
    #[serde(rename = "Employment Change")]
    EmploymentChange,
    #[serde(rename = "Retail Sales")]
    RetailSales,
    #[serde(rename = "Purchasing Managers Index (PMI)")]
    PurchasingManagersIndex,
    #[serde(rename = "Trade Balance")]
    TradeBalance,
    #[serde(rename = "Unemployment Rate")]
    UnemploymentRate,
    #[serde(rename = "Core CPI")]
    CoreCpi,
    #[serde(rename = "Industrial Production")]
    IndustrialProduction,
    #[serde(rename = "Housing Starts")]
    HousingStarts,
    #[serde(rename = "Durable Goods Orders")]
    DurableGoodsOrders,
    #[serde(rename = "Services PMI")]
    ServicesPmi,
    #[serde(rename = "Manufacturing PMI")]
    ManufacturingPmi,
}

impl NewsType {
    pub const ALL: [NewsType; 15] = [
        NewsType::NonFarmPayrolls,
        NewsType::ConsumerPriceIndex,
        NewsType::GrossDomesticProduct,
        NewsType::InterestRateDecision,
        NewsType::EmploymentChange,
        NewsType::RetailSales,
        NewsType::PurchasingManagersIndex,
        NewsType::TradeBalance,
        NewsType::UnemploymentRate,
        NewsType::CoreCpi,
        NewsType::IndustrialProduction,
        NewsType::HousingStarts,
        NewsType::DurableGoodsOrders,
        NewsType::ServicesPmi,
        NewsType::ManufacturingPmi,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NewsType::NonFarmPayrolls => "Non-Farm Payrolls (NFP)",
            NewsType::ConsumerPriceIndex => "Consumer Price Index (CPI)",
            NewsType::GrossDomesticProduct => "Gross Domestic Product (GDP)",
            NewsType::InterestRateDecision => "Interest Rate Decision",
            NewsType::EmploymentChange => "Employment Change",
            NewsType::RetailSales => "Retail Sales",
            NewsType::PurchasingManagersIndex => "Purchasing Managers Index (PMI)",
            NewsType::TradeBalance => "Trade Balance",
            NewsType::UnemploymentRate => "Unemployment Rate",
            NewsType::CoreCpi => "Core CPI",
            NewsType::IndustrialProduction => "Industrial Production",
            NewsType::HousingStarts => "Housing Starts",
            NewsType::DurableGoodsOrders => "Durable Goods Orders",
            NewsType::ServicesPmi => "Services PMI",
            NewsType::ManufacturingPmi => "Manufacturing PMI",
        }
    }

    /// Narrative bucket for template selection.
    pub fn category(&self) -> NewsCategory {
        match self {
            NewsType::NonFarmPayrolls | NewsType::EmploymentChange => NewsCategory::Employment,
            NewsType::ConsumerPriceIndex | NewsType::CoreCpi => NewsCategory::Inflation,
            NewsType::GrossDomesticProduct => NewsCategory::Growth,
            NewsType::InterestRateDecision => NewsCategory::InterestRate,
            NewsType::PurchasingManagersIndex
            | NewsType::ServicesPmi
            | NewsType::ManufacturingPmi => NewsCategory::Pmi,
            NewsType::UnemploymentRate => NewsCategory::Unemployment,
            NewsType::TradeBalance => NewsCategory::TradeBalance,
            NewsType::RetailSales => NewsCategory::RetailSales,
            NewsType::IndustrialProduction => NewsCategory::IndustrialProduction,
            NewsType::HousingStarts => NewsCategory::HousingStarts,
            NewsType::DurableGoodsOrders => NewsCategory::DurableGoods,
        }
    }

    /// Expected-pip importance bucket. Distinct from `category()`: the pip
    /// table groups indicators by market impact, not by narrative.
    pub fn impact_tier(&self) -> ImpactTier {
        match self {
            NewsType::NonFarmPayrolls | NewsType::InterestRateDecision => ImpactTier::Critical,
            NewsType::ConsumerPriceIndex | NewsType::CoreCpi | NewsType::GrossDomesticProduct => {
                ImpactTier::Major
            }
            NewsType::EmploymentChange
            | NewsType::PurchasingManagersIndex
            | NewsType::ServicesPmi
            | NewsType::ManufacturingPmi => ImpactTier::Strong,
            NewsType::RetailSales | NewsType::TradeBalance => ImpactTier::Moderate,
            NewsType::UnemploymentRate
            | NewsType::IndustrialProduction
            | NewsType::HousingStarts
            | NewsType::DurableGoodsOrders => ImpactTier::Minor,
        }
    }

    /// Only NFP is analyzable on the free tier.
    pub fn requires_premium(&self) -> bool {
        !matches!(self, NewsType::NonFarmPayrolls)
    }
}

impl fmt::Display for NewsType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for NewsType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        let found = Self::ALL
            .iter()
            .find(|t| t.label().to_lowercase() == needle)
            .copied();
        if let Some(t) = found {
            return Ok(t);
        }
        match needle.as_str() {
            "nfp" | "non-farm payrolls" => Ok(NewsType::NonFarmPayrolls),
            "cpi" | "consumer price index" => Ok(NewsType::ConsumerPriceIndex),
            "gdp" | "gross domestic product" => Ok(NewsType::GrossDomesticProduct),
            "interest-rate" | "interest rate" => Ok(NewsType::InterestRateDecision),
            "employment" | "employment-change" => Ok(NewsType::EmploymentChange),
            "retail-sales" => Ok(NewsType::RetailSales),
            "pmi" | "purchasing managers index" => Ok(NewsType::PurchasingManagersIndex),
            "trade-balance" => Ok(NewsType::TradeBalance),
            "unemployment" | "unemployment-rate" => Ok(NewsType::UnemploymentRate),
            "core-cpi" => Ok(NewsType::CoreCpi),
            "industrial-production" => Ok(NewsType::IndustrialProduction),
            "housing-starts" => Ok(NewsType::HousingStarts),
            "durable-goods" | "durable goods" => Ok(NewsType::DurableGoodsOrders),
            "services-pmi" => Ok(NewsType::ServicesPmi),
            "manufacturing-pmi" => Ok(NewsType::ManufacturingPmi),
            _ => Err(ValidationError::UnknownNewsType(s.to_string())),
        }
    }
}

/// Narrative template buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsCategory {
    Employment,
    Inflation,
    Growth,
    InterestRate,
    Pmi,
    Unemployment,
    TradeBalance,
    RetailSales,
    IndustrialProduction,
    HousingStarts,
    DurableGoods,
}

/// Base expected-pip buckets by indicator importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactTier {
    Critical,
    Major,
    Strong,
    Moderate,
    Minor,
}

impl ImpactTier {
    /// Base pip estimate before the surprise-magnitude adjustment. Bullish
    /// surprises carry the larger base; bearish and neutral the smaller.
    pub fn base_pips(&self, sentiment: Sentiment) -> u32 {
        let (bullish, other) = match self {
            ImpactTier::Critical => (80, 60),
            ImpactTier::Major => (60, 45),
            ImpactTier::Strong => (50, 35),
            ImpactTier::Moderate => (40, 30),
            ImpactTier::Minor => (35, 25),
        };
        match sentiment {
            Sentiment::Bullish => bullish,
            _ => other,
        }
    }
}

/// The 8 supported ISO currencies. USD is the base leg for all suggested
/// non-USD pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    USD,
    EUR,
    GBP,
    JPY,
    AUD,
    CAD,
    CHF,
    NZD,
}

impl Currency {
    pub const ALL: [Currency; 8] = [
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::JPY,
        Currency::AUD,
        Currency::CAD,
        Currency::CHF,
        Currency::NZD,
    ];

    pub const BASE: Currency = Currency::USD;

    pub fn is_base(&self) -> bool {
        *self == Self::BASE
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::AUD => "AUD",
            Currency::CAD => "CAD",
            Currency::CHF => "CHF",
            Currency::NZD => "NZD",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::USD => "US Dollar",
            Currency::EUR => "Euro",
            Currency::GBP => "British Pound",
            Currency::JPY => "Japanese Yen",
            Currency::AUD => "Australian Dollar",
            Currency::CAD => "Canadian Dollar",
            Currency::CHF => "Swiss Franc",
            Currency::NZD => "New Zealand Dollar",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_uppercase();
        Self::ALL
            .iter()
            .find(|c| c.code() == needle)
            .copied()
            .ok_or_else(|| ValidationError::UnknownCurrency(s.to_string()))
    }
}

/// Directional bias derived from the indicator surprise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    #[serde(rename = "BULLISH")]
    Bullish,
    #[serde(rename = "BEARISH")]
    Bearish,
    #[serde(rename = "NEUTRAL")]
    Neutral,
}

impl Sentiment {
    /// Classification is strictly by sign; no magnitude threshold.
    pub fn from_difference(difference: Decimal) -> Self {
        if difference > Decimal::ZERO {
            Sentiment::Bullish
        } else if difference < Decimal::ZERO {
            Sentiment::Bearish
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Bullish => "BULLISH",
            Sentiment::Bearish => "BEARISH",
            Sentiment::Neutral => "NEUTRAL",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Sentiment::Bullish => "🚀",
            Sentiment::Bearish => "📉",
            Sentiment::Neutral => "➡️",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
}

impl TradeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeDirection::Buy => "BUY",
            TradeDirection::Sell => "SELL",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TradeDirection::Buy => "📈",
            TradeDirection::Sell => "📉",
        }
    }

    pub fn inverted(&self) -> Self {
        match self {
            TradeDirection::Buy => TradeDirection::Sell,
            TradeDirection::Sell => TradeDirection::Buy,
        }
    }
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TradeDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(TradeDirection::Buy),
            "SELL" => Ok(TradeDirection::Sell),
            _ => Err(ValidationError::InvalidChoice {
                field: "direction",
                value: s.to_string(),
            }),
        }
    }
}

/// One suggested trade: pair, side, base pip estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestedPair {
    pub pair: String,
    pub direction: TradeDirection,
    pub pips: u32,
    pub icon: &'static str,
}

impl SuggestedPair {
    pub fn new(pair: impl Into<String>, direction: TradeDirection, pips: u32) -> Self {
        Self {
            pair: pair.into(),
            direction,
            pips,
            icon: direction.icon(),
        }
    }
}

/// Qualitative advice bands keyed by expected pips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradingAdvice {
    #[serde(rename = "⚠️ Low Impact - Avoid Trading")]
    LowImpact,
    #[serde(rename = "⚠️ Moderate - Use Tight Stops")]
    Moderate,
    #[serde(rename = "✅ Good Opportunity")]
    GoodOpportunity,
    #[serde(rename = "🔥 High Impact - Large Positions")]
    HighImpact,
}

impl TradingAdvice {
    pub fn from_pips(expected_pips: u32) -> Self {
        if expected_pips < 20 {
            TradingAdvice::LowImpact
        } else if expected_pips < 40 {
            TradingAdvice::Moderate
        } else if expected_pips < 60 {
            TradingAdvice::GoodOpportunity
        } else {
            TradingAdvice::HighImpact
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TradingAdvice::LowImpact => "⚠️ Low Impact - Avoid Trading",
            TradingAdvice::Moderate => "⚠️ Moderate - Use Tight Stops",
            TradingAdvice::GoodOpportunity => "✅ Good Opportunity",
            TradingAdvice::HighImpact => "🔥 High Impact - Large Positions",
        }
    }

    /// Confidence assigned to journal records logged from an analysis.
    pub fn confidence(&self) -> u8 {
        match self {
            TradingAdvice::LowImpact => 40,
            TradingAdvice::Moderate => 55,
            TradingAdvice::GoodOpportunity => 70,
            TradingAdvice::HighImpact => 85,
        }
    }
}

impl fmt::Display for TradingAdvice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A validated indicator reading. Construction is the validation boundary:
/// past this point the engine cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorReading {
    pub news_type: NewsType,
    pub currency: Currency,
    pub previous: Decimal,
    pub forecast: Decimal,
}

impl IndicatorReading {
    pub fn new(
        news_type: NewsType,
        currency: Currency,
        previous: Decimal,
        forecast: Decimal,
    ) -> Self {
        Self {
            news_type,
            currency,
            previous,
            forecast,
        }
    }

    /// Build a reading from raw form input. Zero, negative and fractional
    /// values are all legal; only missing fields and unparseable numbers are
    /// rejected.
    pub fn from_input(
        news_type: Option<&str>,
        currency: &str,
        previous: &str,
        forecast: &str,
    ) -> ValidationResult<Self> {
        let news_type = match news_type {
            Some(s) if !s.trim().is_empty() => s.parse::<NewsType>()?,
            _ => return Err(ValidationError::MissingField("newsType")),
        };
        let currency = currency.parse::<Currency>()?;
        let previous = parse_decimal("previous", previous)?;
        let forecast = parse_decimal("forecast", forecast)?;
        Ok(Self::new(news_type, currency, previous, forecast))
    }
}

fn parse_decimal(field: &'static str, raw: &str) -> ValidationResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    trimmed
        .parse::<Decimal>()
        .map_err(|_| ValidationError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

/// Full engine output for one reading. Transient; never persisted as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketAnalysis {
    pub sentiment: Sentiment,
    pub narrative: String,
    /// Absent for neutral readings.
    pub currency_impact: Option<String>,
    pub suggested_pairs: Vec<SuggestedPair>,
    pub expected_pips: u32,
    pub advice: TradingAdvice,
    pub time_horizon: &'static str,
}

impl MarketAnalysis {
    /// Direction of the headline (first) suggested pair.
    pub fn prediction(&self) -> TradeDirection {
        self.suggested_pairs
            .first()
            .map(|p| p.direction)
            .unwrap_or(TradeDirection::Buy)
    }

    /// Assemble the presentation report. The structured fields are the
    /// contract; this is display only.
    pub fn report(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{} {} ANALYSIS\n\n{}\n",
            self.sentiment.icon(),
            self.sentiment,
            self.narrative
        ));
        if let Some(impact) = &self.currency_impact {
            out.push_str(&format!("\n{}\n", impact));
        }
        out.push_str("\n🎯 TRADING OPPORTUNITIES:\n\n");
        for pair in &self.suggested_pairs {
            out.push_str(&format!(
                "{} {} | {} | {} pips\n",
                pair.icon, pair.pair, pair.direction, pair.pips
            ));
        }
        out.push_str(&format!(
            "\n📈 TOTAL EXPECTED: {} pips\n💡 ADVICE: {}\n⏱ TIMING: {}\n\n⚠️ RISK: Trade with capital you can afford to lose. Use stop losses.",
            self.expected_pips,
            self.advice,
            self.time_horizon
        ));
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeOutcome {
    Win,
    Loss,
}

impl TradeOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeOutcome::Win => "win",
            TradeOutcome::Loss => "loss",
        }
    }
}

impl FromStr for TradeOutcome {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "win" => Ok(TradeOutcome::Win),
            "loss" => Ok(TradeOutcome::Loss),
            other => Err(ValidationError::InvalidChoice {
                field: "outcome",
                value: other.to_string(),
            }),
        }
    }
}

/// Realized outcome of a completed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActualResult {
    pub profit: Decimal,
    pub pips: Decimal,
    pub outcome: TradeOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One journal entry. `status` and `actual_result` always agree: pending
/// records carry no result, completed records always carry one. Fields are
/// private so the only path from pending to completed is `record_result`,
/// and there is no path back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub id: String,
    pub date: DateTime<Utc>,
    pub news_type: String,
    pub currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<Decimal>,
    pub prediction: TradeDirection,
    pub suggested_pairs: Vec<String>,
    pub expected_pips: u32,
    pub trading_advice: String,
    pub confidence: u8,
    status: TradeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    actual_result: Option<ActualResult>,
}

impl TradeRecord {
    /// Pending record logged from an analysis run.
    pub fn from_analysis(
        reading: &IndicatorReading,
        analysis: &MarketAnalysis,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: new_record_id(),
            date: now,
            news_type: reading.news_type.label().to_string(),
            currency: reading.currency,
            previous: Some(reading.previous),
            forecast: Some(reading.forecast),
            prediction: analysis.prediction(),
            suggested_pairs: analysis
                .suggested_pairs
                .iter()
                .map(|p| p.pair.clone())
                .collect(),
            expected_pips: analysis.expected_pips,
            trading_advice: analysis.advice.label().to_string(),
            confidence: analysis.advice.confidence(),
            status: TradeStatus::Pending,
            actual_result: None,
        }
    }

    /// Manual entry: completed at creation, no forecast context. The news
    /// label is taken from the leading " - "-delimited segment of the notes.
    pub fn manual(result: ActualResult, now: DateTime<Utc>) -> Self {
        let news_type = result
            .notes
            .as_deref()
            .and_then(|n| n.split(" - ").next())
            .filter(|s| !s.is_empty())
            .unwrap_or("Manual Entry")
            .to_string();
        let prediction = match result.outcome {
            TradeOutcome::Win => TradeDirection::Buy,
            TradeOutcome::Loss => TradeDirection::Sell,
        };
        Self {
            id: new_record_id(),
            date: now,
            news_type,
            currency: Currency::USD,
            previous: None,
            forecast: None,
            prediction,
            suggested_pairs: vec!["USD/JPY".to_string()],
            expected_pips: 0,
            trading_advice: "Manual trade entry".to_string(),
            confidence: 0,
            status: TradeStatus::Completed,
            actual_result: Some(result),
        }
    }

    pub fn status(&self) -> TradeStatus {
        self.status
    }

    pub fn actual_result(&self) -> Option<&ActualResult> {
        self.actual_result.as_ref()
    }

    pub fn is_completed(&self) -> bool {
        self.status == TradeStatus::Completed
    }

    pub fn outcome(&self) -> Option<TradeOutcome> {
        self.actual_result.as_ref().map(|r| r.outcome)
    }

    /// One-way transition: pending → completed, exactly once.
    pub fn record_result(&mut self, result: ActualResult) -> JournalResult<()> {
        if self.is_completed() {
            return Err(JournalError::AlreadyCompleted(self.id.clone()));
        }
        self.status = TradeStatus::Completed;
        self.actual_result = Some(result);
        Ok(())
    }

    /// Stored blobs are written by us, but a hand-edited file could desync
    /// status and result; loaders use this to drop such records.
    pub fn is_consistent(&self) -> bool {
        match self.status {
            TradeStatus::Pending => self.actual_result.is_none(),
            TradeStatus::Completed => self.actual_result.is_some(),
        }
    }
}

fn new_record_id() -> String {
    format!("trade_{}", uuid::Uuid::new_v4().simple())
}

/// Entitlement flag persisted as a small JSON blob. A missing key means no
/// entitlement, so the default is inactive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribed_at: Option<DateTime<Utc>>,
}

impl Subscription {
    pub fn active(plan: PremiumPlan, now: DateTime<Utc>) -> Self {
        Self {
            is_active: true,
            plan: Some(plan.title().to_string()),
            subscribed_at: Some(now),
        }
    }

    pub fn plan_name(&self) -> &str {
        self.plan.as_deref().unwrap_or("None")
    }
}

/// Purchasable plan catalog. Prices and copy are product data, not logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PremiumPlan {
    Weekly,
    Monthly,
    Yearly,
    Lifetime,
}

impl PremiumPlan {
    pub const ALL: [PremiumPlan; 4] = [
        PremiumPlan::Weekly,
        PremiumPlan::Monthly,
        PremiumPlan::Yearly,
        PremiumPlan::Lifetime,
    ];

    pub fn product_id(&self) -> &'static str {
        match self {
            PremiumPlan::Weekly => "weekly_premium",
            PremiumPlan::Monthly => "monthly_premium",
            PremiumPlan::Yearly => "yearly_premium",
            PremiumPlan::Lifetime => "lifetime_premium",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PremiumPlan::Weekly => "Weekly Pro",
            PremiumPlan::Monthly => "Monthly Pro",
            PremiumPlan::Yearly => "Yearly Pro",
            PremiumPlan::Lifetime => "Lifetime Pro",
        }
    }

    pub fn price(&self) -> &'static str {
        match self {
            PremiumPlan::Weekly => "$2.99",
            PremiumPlan::Monthly => "$9.99",
            PremiumPlan::Yearly => "$99.99",
            PremiumPlan::Lifetime => "$299.99",
        }
    }

    pub fn period(&self) -> &'static str {
        match self {
            PremiumPlan::Weekly => "per week",
            PremiumPlan::Monthly => "per month",
            PremiumPlan::Yearly => "per year",
            PremiumPlan::Lifetime => "one-time",
        }
    }

    pub fn savings(&self) -> Option<&'static str> {
        match self {
            PremiumPlan::Weekly => None,
            PremiumPlan::Monthly => Some("Save 17%"),
            PremiumPlan::Yearly => Some("Save 30%"),
            PremiumPlan::Lifetime => Some("Save 50%"),
        }
    }
}

impl FromStr for PremiumPlan {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "weekly_premium" => Ok(PremiumPlan::Weekly),
            "monthly" | "monthly_premium" => Ok(PremiumPlan::Monthly),
            "yearly" | "yearly_premium" => Ok(PremiumPlan::Yearly),
            "lifetime" | "lifetime_premium" => Ok(PremiumPlan::Lifetime),
            other => Err(ValidationError::UnknownPlan(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn news_type_label_round_trip() {
        for t in NewsType::ALL {
            assert_eq!(t.label().parse::<NewsType>().unwrap(), t);
        }
    }

    #[test]
    fn news_type_aliases() {
        assert_eq!("nfp".parse::<NewsType>().unwrap(), NewsType::NonFarmPayrolls);
        assert_eq!("Core CPI".parse::<NewsType>().unwrap(), NewsType::CoreCpi);
        assert_eq!(
            "interest-rate".parse::<NewsType>().unwrap(),
            NewsType::InterestRateDecision
        );
        assert!("weather".parse::<NewsType>().is_err());
    }

    #[test]
    fn only_nfp_is_free() {
        let free: Vec<_> = NewsType::ALL
            .iter()
            .filter(|t| !t.requires_premium())
            .collect();
        assert_eq!(free, vec![&NewsType::NonFarmPayrolls]);
    }

    #[test]
    fn sentiment_by_sign_only() {
        assert_eq!(
            Sentiment::from_difference(dec!(0.0001)),
            Sentiment::Bullish
        );
        assert_eq!(
            Sentiment::from_difference(dec!(-1000)),
            Sentiment::Bearish
        );
        assert_eq!(Sentiment::from_difference(Decimal::ZERO), Sentiment::Neutral);
    }

    #[test]
    fn reading_validation() {
        let err = IndicatorReading::from_input(None, "USD", "1", "2").unwrap_err();
        assert_eq!(err, ValidationError::MissingField("newsType"));

        let err = IndicatorReading::from_input(Some("nfp"), "USD", "", "2").unwrap_err();
        assert_eq!(err, ValidationError::MissingField("previous"));

        let err = IndicatorReading::from_input(Some("nfp"), "USD", "abc", "2").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidNumber { field: "previous", .. }));

        // Zero, negative and fractional values are all legal.
        let reading =
            IndicatorReading::from_input(Some("nfp"), "usd", "-0.5", "0").unwrap();
        assert_eq!(reading.previous, dec!(-0.5));
        assert_eq!(reading.forecast, Decimal::ZERO);
    }

    #[test]
    fn advice_thresholds() {
        assert_eq!(TradingAdvice::from_pips(10), TradingAdvice::LowImpact);
        assert_eq!(TradingAdvice::from_pips(19), TradingAdvice::LowImpact);
        assert_eq!(TradingAdvice::from_pips(20), TradingAdvice::Moderate);
        assert_eq!(TradingAdvice::from_pips(39), TradingAdvice::Moderate);
        assert_eq!(TradingAdvice::from_pips(40), TradingAdvice::GoodOpportunity);
        assert_eq!(TradingAdvice::from_pips(59), TradingAdvice::GoodOpportunity);
        assert_eq!(TradingAdvice::from_pips(60), TradingAdvice::HighImpact);
    }

    #[test]
    fn record_result_is_one_way() {
        let result = ActualResult {
            profit: dec!(100),
            pips: dec!(50),
            outcome: TradeOutcome::Win,
            notes: None,
        };
        let mut record = TradeRecord::manual(result.clone(), Utc::now());
        assert!(record.is_completed());
        assert_eq!(
            record.record_result(result).unwrap_err(),
            JournalError::AlreadyCompleted(record.id.clone())
        );
    }

    #[test]
    fn pending_record_completes_exactly_once() {
        let reading =
            IndicatorReading::from_input(Some("nfp"), "USD", "150", "180").unwrap();
        let analysis = crate::analysis::engine::analyze(&reading);
        let mut record = TradeRecord::from_analysis(&reading, &analysis, Utc::now());
        assert_eq!(record.status(), TradeStatus::Pending);
        assert!(record.actual_result().is_none());
        assert!(record.is_consistent());

        let result = ActualResult {
            profit: dec!(-25),
            pips: dec!(-10),
            outcome: TradeOutcome::Loss,
            notes: Some("stopped out".to_string()),
        };
        record.record_result(result.clone()).unwrap();
        assert_eq!(record.status(), TradeStatus::Completed);
        assert_eq!(record.actual_result(), Some(&result));
        assert!(record.is_consistent());

        assert!(record.record_result(result).is_err());
    }

    #[test]
    fn manual_record_takes_news_label_from_notes() {
        let result = ActualResult {
            profit: dec!(10),
            pips: dec!(5),
            outcome: TradeOutcome::Win,
            notes: Some("CPI surprise - scalped the spike".to_string()),
        };
        let record = TradeRecord::manual(result, Utc::now());
        assert_eq!(record.news_type, "CPI surprise");
        assert_eq!(record.confidence, 0);
        assert_eq!(record.expected_pips, 0);

        let unnamed = TradeRecord::manual(
            ActualResult {
                profit: dec!(10),
                pips: dec!(5),
                outcome: TradeOutcome::Loss,
                notes: None,
            },
            Utc::now(),
        );
        assert_eq!(unnamed.news_type, "Manual Entry");
        assert_eq!(unnamed.prediction, TradeDirection::Sell);
    }

    #[test]
    fn trade_record_serde_shape() {
        let reading =
            IndicatorReading::from_input(Some("nfp"), "USD", "150", "180").unwrap();
        let analysis = crate::analysis::engine::analyze(&reading);
        let record = TradeRecord::from_analysis(&reading, &analysis, Utc::now());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["newsType"], "Non-Farm Payrolls (NFP)");
        assert_eq!(json["currency"], "USD");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["previous"], "150");
        assert!(json.get("actualResult").is_none());

        let back: TradeRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn subscription_default_is_inactive() {
        let sub = Subscription::default();
        assert!(!sub.is_active);
        assert_eq!(sub.plan_name(), "None");
    }
}

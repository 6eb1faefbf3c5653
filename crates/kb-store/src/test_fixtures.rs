//! Test fixtures for store and rendering tests.
//!
//! ## Usage
//!
//! ```rust
//! use kb_store::test_fixtures::helsinki;
//!
//! let fx = helsinki();
//! assert_eq!(fx.store.label(fx.city).unwrap(), "Helsinki");
//! ```

use bigdecimal::BigDecimal;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use crate::{
    CoordinateValue, KnowledgeStore, QuantityValue, Result, StatementParent, StringValue,
    TimePrecision, TimeValue,
};

/// A small graph about Helsinki.
///
/// - `city`: translations en, fi, fi/genitive, sv
/// - population statement (656920) with a point-in-time qualifier (2021)
/// - coordinate location on `earth`
/// - nickname "Stadi"
pub struct HelsinkiFixture {
    pub store: KnowledgeStore,
    pub city: Uuid,
    pub earth: Uuid,
    pub population: Uuid,
    pub point_in_time: Uuid,
    pub location: Uuid,
    pub nickname: Uuid,
    pub population_statement: Uuid,
    pub point_in_time_qualifier: Uuid,
    pub location_statement: Uuid,
    pub nickname_statement: Uuid,
}

/// Build [`HelsinkiFixture`] in a default-configured store.
pub fn helsinki() -> HelsinkiFixture {
    build_helsinki(KnowledgeStore::default()).expect("fixture data is valid")
}

/// Build [`HelsinkiFixture`] into the given (empty) store.
pub fn build_helsinki(mut store: KnowledgeStore) -> Result<HelsinkiFixture> {
    let city = store.create_concept(Some("capital of Finland"));
    store.add_translation(city, "Helsinki", "en", None)?;
    store.add_translation(city, "Helsinki", "fi", None)?;
    store.add_translation(city, "Helsingin", "fi", Some("genitive"))?;
    store.add_translation(city, "Helsingfors", "sv", None)?;

    let labelled = |store: &mut KnowledgeStore, label: &str| -> Result<Uuid> {
        let id = store.create_concept(None);
        store.add_translation(id, label, "en", None)?;
        Ok(id)
    };
    let earth = labelled(&mut store, "Earth")?;
    let population = labelled(&mut store, "population")?;
    let point_in_time = labelled(&mut store, "point in time")?;
    let location = labelled(&mut store, "coordinate location")?;
    let nickname = labelled(&mut store, "nickname")?;

    let population_statement =
        store.create_statement(StatementParent::Concept(city), population, None)?;
    store.attach_value(
        population_statement,
        QuantityValue::new(BigDecimal::from(656_920), None, None)?,
    )?;

    let point_in_time_qualifier = store.create_statement(
        StatementParent::Statement(population_statement),
        point_in_time,
        None,
    )?;
    let census_day = Utc
        .with_ymd_and_hms(2021, 12, 31, 0, 0, 0)
        .single()
        .ok_or_else(|| crate::Error::InvalidInput("invalid census day".to_string()))?;
    store.attach_value(
        point_in_time_qualifier,
        TimeValue::new(census_day, TimePrecision::Year),
    )?;

    let location_statement =
        store.create_statement(StatementParent::Concept(city), location, None)?;
    store.attach_value(
        location_statement,
        CoordinateValue::new(60.17, 24.94, 10.0, None, earth)?,
    )?;

    let nickname_statement =
        store.create_statement(StatementParent::Concept(city), nickname, None)?;
    store.attach_value(nickname_statement, StringValue::new("Stadi"))?;

    Ok(HelsinkiFixture {
        store,
        city,
        earth,
        population,
        point_in_time,
        location,
        nickname,
        population_statement,
        point_in_time_qualifier,
        location_statement,
        nickname_statement,
    })
}

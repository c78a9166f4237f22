//! Tests for CountryService against an in-memory repository.

#[cfg(test)]
mod tests {
    use crate::constants::LAST_REFRESHED_AT_KEY;
    use crate::countries::{
        Country, CountryFilter, CountryRepositoryTrait, CountryService, CountryServiceTrait,
        CountrySort, CountryUpsert,
    };
    use crate::errors::{Error, ValidationError};
    use crate::testing::{sample_country, InMemoryCountryStore, InMemoryMetadataStore};
    use std::sync::Arc;

    fn service_with(countries: Vec<Country>) -> (CountryService, Arc<InMemoryCountryStore>, Arc<InMemoryMetadataStore>) {
        let store = Arc::new(InMemoryCountryStore::with_countries(countries));
        let metadata = store.metadata();
        let service = CountryService::new(store.clone(), metadata.clone());
        (service, store, metadata)
    }

    fn seeded() -> Vec<Country> {
        vec![
            sample_country(1, "Nigeria", Some("Africa"), Some("NGN"), Some(25_767_448_125.2)),
            sample_country(2, "Ghana", Some("Africa"), Some("GHS"), Some(3_029_834_520.12)),
            sample_country(3, "France", Some("Europe"), Some("EUR"), None),
            sample_country(4, "Germany", Some("Europe"), Some("EUR"), Some(90_000_000_000.0)),
        ]
    }

    #[test]
    fn test_list_without_filters_returns_everything() {
        let (service, _, _) = service_with(seeded());
        let all = service.list_countries(&CountryFilter::default()).unwrap();
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_region_filter_is_case_insensitive() {
        let (service, _, _) = service_with(seeded());
        let filter = CountryFilter {
            region: Some("aFrIcA".to_string()),
            ..Default::default()
        };
        let found = service.list_countries(&filter).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found
            .iter()
            .all(|c| c.region.as_deref().unwrap().eq_ignore_ascii_case("africa")));
    }

    #[test]
    fn test_unknown_currency_yields_empty_list() {
        let (service, _, _) = service_with(seeded());
        let filter = CountryFilter {
            currency: Some("XYZ".to_string()),
            ..Default::default()
        };
        assert!(service.list_countries(&filter).unwrap().is_empty());
    }

    #[test]
    fn test_gdp_desc_is_non_increasing_with_nulls_last() {
        let (service, _, _) = service_with(seeded());
        let filter = CountryFilter {
            sort: Some(CountrySort::GdpDesc),
            ..Default::default()
        };
        let sorted = service.list_countries(&filter).unwrap();
        let gdps: Vec<Option<f64>> = sorted.iter().map(|c| c.estimated_gdp).collect();
        assert_eq!(gdps.last().copied().flatten(), None);
        let known: Vec<f64> = gdps.iter().flatten().copied().collect();
        assert!(known.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_get_country_by_name_ignores_case() {
        let (service, _, _) = service_with(seeded());
        let country = service.get_country_by_name("gHaNa").unwrap();
        assert_eq!(country.name, "Ghana");
    }

    #[test]
    fn test_get_missing_country_is_not_found() {
        let (service, _, _) = service_with(seeded());
        assert!(matches!(
            service.get_country_by_name("Wakanda"),
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_country() {
        let (service, store, _) = service_with(seeded());
        assert!(!service.delete_country("Wakanda").await.unwrap());
        assert_eq!(store.count_countries().unwrap(), 4);

        assert!(service.delete_country("NIGERIA").await.unwrap());
        assert_eq!(store.count_countries().unwrap(), 3);
        assert!(store.find_by_name("Nigeria").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_status_reads_timestamp() {
        let (service, _, metadata) = service_with(seeded());
        let status = service.get_status().unwrap();
        assert_eq!(status.total_countries, 4);
        assert_eq!(status.last_refreshed_at, None);

        metadata.insert(LAST_REFRESHED_AT_KEY, "2025-10-22T14:05:09.000001");
        let status = service.get_status().unwrap();
        assert_eq!(
            status.last_refreshed_at.map(|t| t.to_string()),
            Some("2025-10-22 14:05:09.000001".to_string())
        );
    }

    #[test]
    fn test_status_treats_malformed_timestamp_as_absent() {
        let (service, _, metadata) = service_with(seeded());
        metadata.insert(LAST_REFRESHED_AT_KEY, "not-a-date");
        let status = service.get_status().unwrap();
        assert_eq!(status.total_countries, 4);
        assert_eq!(status.last_refreshed_at, None);
    }

    #[tokio::test]
    async fn test_upsert_with_different_case_updates() {
        let (service, store, _) = service_with(seeded());
        let updated = service
            .upsert_country(CountryUpsert {
                name: Some("ghana".to_string()),
                population: Some(33_000_000),
                currency_code: Some("GHS".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.id, 2);
        assert_eq!(updated.population, 33_000_000);
        assert_eq!(store.count_countries().unwrap(), 4);
    }

    #[tokio::test]
    async fn test_upsert_inserts_new_country() {
        let (service, store, _) = service_with(seeded());
        let created = service
            .upsert_country(CountryUpsert {
                name: Some("Kenya".to_string()),
                population: Some(53_771_300),
                currency_code: Some("KES".to_string()),
                region: Some("Africa".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(created.name, "Kenya");
        assert_eq!(store.count_countries().unwrap(), 5);
    }

    #[tokio::test]
    async fn test_upsert_missing_fields_fails() {
        let (service, store, _) = service_with(seeded());
        let err = service
            .upsert_country(CountryUpsert {
                name: Some("Kenya".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingFields(ref f))
                if f == &vec!["population".to_string(), "currency_code".to_string()]
        ));
        assert_eq!(store.count_countries().unwrap(), 4);
    }
}

use super::common::{id, product, sample_products};
use crate::catalog::classify::Classifier;
use crate::catalog::curation::CurationSnapshot;
use crate::catalog::domain::{CategoryFilter, FilterParams, PriceBucket, Product, SortKey};
use crate::catalog::engine::{EngineConfig, FilterSortEngine, PopularityOrder, SearchMode};
use crate::catalog::pricing::PricingPolicy;

fn engine() -> FilterSortEngine {
    FilterSortEngine::default()
}

fn engine_with(config: EngineConfig) -> FilterSortEngine {
    FilterSortEngine::new(Classifier::default(), PricingPolicy::default(), config)
}

fn ids(result: &[&Product]) -> Vec<String> {
    result.iter().map(|product| product.id.0.clone()).collect()
}

fn params(category: CategoryFilter) -> FilterParams {
    FilterParams {
        category,
        ..FilterParams::default()
    }
}

#[test]
fn hidden_products_are_suppressed_by_default() {
    let products = sample_products();
    let mut curation = CurationSnapshot::default();
    curation.hidden.insert(id("chips"));

    let result = engine().apply(&products, &curation, &params(CategoryFilter::All));

    assert!(!ids(&result).contains(&"chips".to_string()));
    assert_eq!(result.len(), products.len() - 1);
}

#[test]
fn include_hidden_restores_suppressed_products() {
    let products = sample_products();
    let mut curation = CurationSnapshot::default();
    curation.hidden.insert(id("chips"));

    let request = FilterParams {
        include_hidden: true,
        ..params(CategoryFilter::All)
    };
    let result = engine().apply(&products, &curation, &request);

    assert_eq!(result.len(), products.len());
}

#[test]
fn hidden_view_shows_only_hidden_products() {
    let products = sample_products();
    let mut curation = CurationSnapshot::default();
    curation.hidden.insert(id("chips"));
    curation.hidden.insert(id("cola"));

    let result = engine().apply(&products, &curation, &params(CategoryFilter::Hidden));

    let mut found = ids(&result);
    found.sort();
    assert_eq!(found, vec!["chips".to_string(), "cola".to_string()]);
}

#[test]
fn hidden_view_still_honors_search() {
    let products = sample_products();
    let mut curation = CurationSnapshot::default();
    curation.hidden.insert(id("chips"));
    curation.hidden.insert(id("cola"));

    let request = FilterParams {
        search: Some("cola".to_string()),
        ..params(CategoryFilter::Hidden)
    };
    let result = engine().apply(&products, &curation, &request);

    assert_eq!(ids(&result), vec!["cola".to_string()]);
}

#[test]
fn promoted_view_orders_by_rank() {
    let products = sample_products();
    let curation = CurationSnapshot {
        promoted: vec![id("sandwich"), id("chips")],
        ..CurationSnapshot::default()
    };

    let result = engine().apply(&products, &curation, &params(CategoryFilter::Promoted));

    assert_eq!(
        ids(&result),
        vec!["sandwich".to_string(), "chips".to_string()]
    );
}

#[test]
fn promoted_view_drops_hidden_members() {
    let products = sample_products();
    let mut curation = CurationSnapshot {
        promoted: vec![id("sandwich"), id("chips")],
        ..CurationSnapshot::default()
    };
    curation.hidden.insert(id("sandwich"));

    let result = engine().apply(&products, &curation, &params(CategoryFilter::Promoted));

    assert_eq!(ids(&result), vec!["chips".to_string()]);
}

#[test]
fn all_view_puts_promoted_items_first_in_rank_order() {
    let products = sample_products();
    let curation = CurationSnapshot {
        promoted: vec![id("pretzels"), id("water")],
        ..CurationSnapshot::default()
    };

    let result = engine().apply(&products, &curation, &params(CategoryFilter::All));

    let found = ids(&result);
    assert_eq!(found[0], "pretzels");
    assert_eq!(found[1], "water");
    // Remaining items follow the popularity ordering, highest first.
    assert_eq!(found[2], "cola");
}

#[test]
fn category_views_ignore_promotion_ordering() {
    let products = sample_products();
    let curation = CurationSnapshot {
        promoted: vec![id("water")],
        ..CurationSnapshot::default()
    };

    let result = engine().apply(&products, &curation, &params(CategoryFilter::Beverages));

    // cola (95) outranks promoted water (60) outside the "all" view.
    assert_eq!(ids(&result), vec!["cola".to_string(), "water".to_string()]);
}

#[test]
fn beverages_filter_includes_cold_beverage_alias() {
    let products = sample_products();
    let curation = CurationSnapshot::default();

    let result = engine().apply(&products, &curation, &params(CategoryFilter::Beverages));

    let mut found = ids(&result);
    found.sort();
    assert_eq!(found, vec!["cola".to_string(), "water".to_string()]);
}

#[test]
fn meals_filter_excludes_ice_cream_sandwich() {
    let products = sample_products();
    let curation = CurationSnapshot::default();

    let result = engine().apply(&products, &curation, &params(CategoryFilter::Meals));

    assert_eq!(ids(&result), vec!["sandwich".to_string()]);
}

#[test]
fn healthy_filter_spans_brand_and_name_heuristics() {
    let products = sample_products();
    let curation = CurationSnapshot::default();

    let result = engine().apply(&products, &curation, &params(CategoryFilter::Healthy));

    let mut found = ids(&result);
    found.sort();
    assert_eq!(
        found,
        vec![
            "kind-bar".to_string(),
            "protein-bar".to_string(),
            "water".to_string(),
        ]
    );
}

#[test]
fn brand_filter_is_exact() {
    let products = sample_products();
    let curation = CurationSnapshot::default();

    let request = FilterParams {
        brand: Some("Lays".to_string()),
        ..params(CategoryFilter::All)
    };
    let result = engine().apply(&products, &curation, &request);

    assert_eq!(ids(&result), vec!["chips".to_string()]);
}

#[test]
fn price_bucket_boundary_is_half_open() {
    let products = sample_products();
    let curation = CurationSnapshot::default();

    // chips and pretzels resolve to exactly 2.00, which belongs to 2-4.
    let request = FilterParams {
        price_bucket: Some(PriceBucket::UnderTwo),
        ..params(CategoryFilter::All)
    };
    assert!(engine().apply(&products, &curation, &request).is_empty());

    let request = FilterParams {
        price_bucket: Some(PriceBucket::TwoToFour),
        ..params(CategoryFilter::All)
    };
    let found = ids(&engine().apply(&products, &curation, &request));
    assert!(found.contains(&"chips".to_string()));
    assert!(found.contains(&"pretzels".to_string()));
    assert!(!found.contains(&"sandwich".to_string()));
}

#[test]
fn custom_price_moves_a_product_between_buckets() {
    let products = sample_products();
    let mut curation = CurationSnapshot::default();
    curation.custom_prices.insert(id("chips"), 1.5);

    let request = FilterParams {
        price_bucket: Some(PriceBucket::UnderTwo),
        ..params(CategoryFilter::All)
    };
    let result = engine().apply(&products, &curation, &request);

    assert_eq!(ids(&result), vec!["chips".to_string()]);
}

#[test]
fn unpriceable_products_are_excluded_from_bucket_filtering() {
    let mut products = sample_products();
    products.push(product("broken", "Mystery Item", "Acme", "snacks", 0.0, None));
    let curation = CurationSnapshot::default();

    let request = FilterParams {
        price_bucket: Some(PriceBucket::TwoToFour),
        ..params(CategoryFilter::All)
    };
    let result = engine().apply(&products, &curation, &request);

    assert!(!ids(&result).contains(&"broken".to_string()));
}

#[test]
fn search_is_and_combined_with_category() {
    let products = sample_products();
    let curation = CurationSnapshot::default();

    // "water" matches the healthy category; "bar" does not match its name
    // or brand, so the combined query must exclude it.
    let request = FilterParams {
        search: Some("bar".to_string()),
        ..params(CategoryFilter::Healthy)
    };
    let result = engine().apply(&products, &curation, &request);

    let mut found = ids(&result);
    found.sort();
    assert_eq!(found, vec!["kind-bar".to_string(), "protein-bar".to_string()]);
}

#[test]
fn search_matches_brand_case_insensitively() {
    let products = sample_products();
    let curation = CurationSnapshot::default();

    let request = FilterParams {
        search: Some("LAYS".to_string()),
        ..params(CategoryFilter::All)
    };
    let result = engine().apply(&products, &curation, &request);

    assert_eq!(ids(&result), vec!["chips".to_string()]);
}

#[test]
fn bypass_mode_lets_search_skip_category_filters() {
    let products = sample_products();
    let curation = CurationSnapshot::default();
    let engine = engine_with(EngineConfig {
        search_mode: SearchMode::Bypass,
        ..EngineConfig::default()
    });

    // Cola is not healthy, but in bypass mode an active query ignores the
    // category stage entirely.
    let request = FilterParams {
        search: Some("cola".to_string()),
        ..params(CategoryFilter::Healthy)
    };
    let result = engine.apply(&products, &curation, &request);

    assert_eq!(ids(&result), vec!["cola".to_string()]);
}

#[test]
fn bypass_mode_still_suppresses_hidden_products() {
    let products = sample_products();
    let mut curation = CurationSnapshot::default();
    curation.hidden.insert(id("cola"));
    let engine = engine_with(EngineConfig {
        search_mode: SearchMode::Bypass,
        ..EngineConfig::default()
    });

    let request = FilterParams {
        search: Some("cola".to_string()),
        ..params(CategoryFilter::All)
    };
    let result = engine.apply(&products, &curation, &request);

    assert!(result.is_empty());
}

#[test]
fn popularity_sort_defaults_to_highest_first_with_missing_as_zero() {
    let mut products = sample_products();
    products.push(product("mystery", "Mystery Snack", "Acme", "snacks", 1.0, None));
    let curation = CurationSnapshot::default();

    let result = engine().apply(&products, &curation, &params(CategoryFilter::All));
    let found = ids(&result);

    assert_eq!(found.first().map(String::as_str), Some("cola"));
    assert_eq!(found.last().map(String::as_str), Some("mystery"));
}

#[test]
fn popularity_sort_can_run_lowest_first_with_missing_as_five_hundred() {
    let mut products = sample_products();
    products.push(product("mystery", "Mystery Snack", "Acme", "snacks", 1.0, None));
    let curation = CurationSnapshot::default();
    let engine = engine_with(EngineConfig {
        popularity_order: PopularityOrder::LowestFirst,
        ..EngineConfig::default()
    });

    let result = engine.apply(&products, &curation, &params(CategoryFilter::All));
    let found = ids(&result);

    assert_eq!(found.first().map(String::as_str), Some("pretzels"));
    assert_eq!(found.last().map(String::as_str), Some("mystery"));
}

#[test]
fn price_sorts_use_wholesale_cost() {
    let products = sample_products();
    let curation = CurationSnapshot::default();

    let request = FilterParams {
        sort: SortKey::PriceLow,
        ..params(CategoryFilter::All)
    };
    let result = engine().apply(&products, &curation, &request);
    assert_eq!(result.first().map(|p| p.unit_price), Some(0.55));
    assert_eq!(result.last().map(|p| p.unit_price), Some(2.75));

    let request = FilterParams {
        sort: SortKey::PriceHigh,
        ..params(CategoryFilter::All)
    };
    let result = engine().apply(&products, &curation, &request);
    assert_eq!(result.first().map(|p| p.unit_price), Some(2.75));
}

#[test]
fn price_low_sort_is_stable_for_equal_wholesale_costs() {
    let products = sample_products();
    let curation = CurationSnapshot::default();

    let request = FilterParams {
        sort: SortKey::PriceLow,
        ..params(CategoryFilter::All)
    };
    let result = engine().apply(&products, &curation, &request);

    // chips and pretzels share a 0.55 wholesale cost; input order holds.
    let found = ids(&result);
    let chips = found.iter().position(|entry| entry == "chips").expect("chips present");
    let pretzels = found
        .iter()
        .position(|entry| entry == "pretzels")
        .expect("pretzels present");
    assert_eq!(pretzels, chips + 1);
}

#[test]
fn margin_sort_ranks_highest_markup_first() {
    let products = sample_products();
    let curation = CurationSnapshot::default();

    let request = FilterParams {
        sort: SortKey::Margin,
        ..params(CategoryFilter::All)
    };
    let result = engine().apply(&products, &curation, &request);

    // chips: 2.00 on 0.55 wholesale, roughly 2.6x markup, beats
    // sandwich: 7.00 on 2.75 wholesale, roughly 1.5x markup.
    let found = ids(&result);
    let chips = found.iter().position(|entry| entry == "chips").expect("chips present");
    let sandwich = found
        .iter()
        .position(|entry| entry == "sandwich")
        .expect("sandwich present");
    assert!(chips < sandwich);
}

#[test]
fn margin_sort_puts_unpriceable_products_last() {
    let mut products = sample_products();
    products.push(product("broken", "Mystery Item", "Acme", "snacks", 0.0, None));
    let curation = CurationSnapshot::default();

    let request = FilterParams {
        sort: SortKey::Margin,
        ..params(CategoryFilter::All)
    };
    let result = engine().apply(&products, &curation, &request);

    assert_eq!(ids(&result).last().map(String::as_str), Some("broken"));
}

#[test]
fn name_sort_is_case_insensitive_ascending() {
    let products = sample_products();
    let curation = CurationSnapshot::default();

    let request = FilterParams {
        sort: SortKey::Name,
        ..params(CategoryFilter::All)
    };
    let result = engine().apply(&products, &curation, &request);
    let names: Vec<&str> = result.iter().map(|p| p.name.as_str()).collect();

    let mut sorted = names.clone();
    sorted.sort_by_key(|name| name.to_lowercase());
    assert_eq!(names, sorted);
}

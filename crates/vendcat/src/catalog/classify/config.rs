use serde::{Deserialize, Serialize};

/// Keyword tables driving heuristic classification. The lists are
/// configuration data so the taxonomy can be updated without touching
/// engine logic; defaults match the curated vending product line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Lowercased name substrings that mark a record as supplies rather
    /// than sellable food; matching items are dropped at catalog load.
    pub non_food_keywords: Vec<String>,
    /// Health-food brands, matched exactly or as a prefix of the brand.
    pub healthy_brands: Vec<String>,
    /// Name phrases that mark a product as healthy regardless of brand.
    pub healthy_product_terms: Vec<String>,
    /// Raw categories eligible for the meals view.
    pub meal_categories: Vec<String>,
    /// Name substrings that disqualify an item from the meals view.
    /// Exclusion wins over the include list.
    pub meal_exclude_terms: Vec<String>,
    /// Name substrings that identify an actual prepared meal.
    pub meal_include_terms: Vec<String>,
    /// Raw taxonomy aliases that all mean "beverages".
    pub beverage_categories: Vec<String>,
}

fn table(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|entry| entry.to_string()).collect()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            non_food_keywords: table(&[
                "stirrer",
                "stir stk",
                "straw ",
                "straws",
                "napkin",
                "fork ",
                "forks",
                "spoon ",
                "spoons",
                "knife ",
                "knives",
                "utensil",
                "plate ",
                "plates",
                "tray ",
                "trays",
                "container",
                "sleeve",
                "filter coffee",
                "filter paper",
                "filter tea",
                "filter urn",
                "coffee filter",
                "sugar ind",
                "sugar packet",
                "sweetener packet",
                "splenda",
                "equal packet",
                "creamer cup",
                "creamer lqd",
                "creamer frnch",
                "deodorant",
                "sanitizer",
                "soap",
                "cleaner",
                "towel",
                "tissue",
                "glove",
                "foil wrap",
                "plastic wrap",
                "cling wrap",
            ]),
            healthy_brands: table(&[
                "quest", "rxbar", "clif", "larabar", "thinkth", "bareblls", "built", "onenbar",
                "perfectb", "natureva", "fiberone", "belvita", "nutrigra", "kashi", "smartwat",
                "vitawat", "bodyarmo", "corepower", "fairlife", "chobani", "siggi", "oikos",
                "atkins", "gopicnic", "sahale", "biena", "hippeas", "lesserev", "skinnypo",
                "smartfoo", "popchips", "veggistr", "foodshld", "thatsit", "madegood", "premier",
                "muscle", "optimum", "bai",
            ]),
            healthy_product_terms: table(&[
                "protein bar",
                "protein shake",
                "granola bar",
                "greek yogurt",
                "yogurt cup",
                "yogurt drink",
                "yogurt flip",
                "trail mix",
                "veggie chips",
                "veggie straw",
                "rice cake",
                "protein cookie",
                "energy bar",
                "nutrition bar",
                "keto bar",
            ]),
            meal_categories: table(&["hot_foods", "refrigerated", "frozen_foods"]),
            meal_exclude_terms: table(&[
                "ice cream",
                "ice crm",
                "cracker",
                "cookie",
                "candy",
                "gum ",
                "stir ",
                "wrapped",
                "sour wedge",
            ]),
            meal_include_terms: table(&[
                "sandwich", " wrap", "salad", "burger", " sub ", "wedge", "bowl",
            ]),
            beverage_categories: table(&["beverages", "cold_beverage"]),
        }
    }
}

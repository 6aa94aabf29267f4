//! Static drink menu.
//!
//! The catalog is fixed: three categories, every drink free of charge.
//! It is built once at startup and shared read-only through app state.

use std::fmt;
use std::str::FromStr;

use officebar_core::Price;
use serde::Serialize;

/// A single drink on the menu.
#[derive(Debug, Clone, Serialize)]
pub struct Drink {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: Price,
    pub image: &'static str,
}

/// A group of related drinks.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub name: &'static str,
    pub emoji: &'static str,
    pub drinks: Vec<Drink>,
}

/// Identifier of a menu category, as it appears in request paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryId {
    Coffee,
    Tea,
    Softdrinks,
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self {
            Self::Coffee => "coffee",
            Self::Tea => "tea",
            Self::Softdrinks => "softdrinks",
        };
        write!(f, "{id}")
    }
}

impl FromStr for CategoryId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coffee" => Ok(Self::Coffee),
            "tea" => Ok(Self::Tea),
            "softdrinks" => Ok(Self::Softdrinks),
            other => Err(format!("unknown menu category: {other}")),
        }
    }
}

/// The full drink catalog, keyed by category.
#[derive(Debug, Clone, Serialize)]
pub struct Menu {
    pub coffee: Category,
    pub tea: Category,
    pub softdrinks: Category,
}

impl Menu {
    /// Build the standard OfficeBar catalog.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            coffee: Category {
                name: "Premium Coffee",
                emoji: "☕",
                drinks: vec![
                    drink("espresso", "Espresso", "Bold and intense single shot", "☕"),
                    drink("americano", "Americano", "Espresso with hot water", "☕"),
                    drink(
                        "cappuccino",
                        "Cappuccino",
                        "Espresso with steamed milk and foam",
                        "☕",
                    ),
                    drink("latte", "Latte", "Smooth espresso with silky milk", "☕"),
                    drink("macchiato", "Macchiato", "Espresso marked with foam", "☕"),
                    drink("cortado", "Cortado", "Equal parts espresso and milk", "☕"),
                    drink("mocha", "Mocha", "Espresso with chocolate and milk", "☕"),
                    drink("flatwhite", "Flat White", "Creamy espresso with microfoam", "☕"),
                ],
            },
            tea: Category {
                name: "Premium Tea",
                emoji: "🍵",
                drinks: vec![
                    drink("black_tea", "Black Tea", "Classic English black tea blend", "🍵"),
                    drink("green_tea", "Green Tea", "Fresh and light green tea", "🍵"),
                    drink("chamomile", "Chamomile", "Calming herbal chamomile tea", "🍵"),
                    drink("peppermint", "Peppermint Tea", "Refreshing peppermint blend", "🍵"),
                    drink("oolong", "Oolong Tea", "Traditional Chinese oolong", "🍵"),
                    drink("matcha", "Matcha Latte", "Vibrant ceremonial matcha", "🍵"),
                ],
            },
            softdrinks: Category {
                name: "Soft Drinks",
                emoji: "🥤",
                drinks: vec![
                    drink(
                        "espresso_tonic",
                        "Espresso Tonic",
                        "Chilled espresso with tonic water",
                        "🥤",
                    ),
                    drink("cold_brew", "Cold Brew Coffee", "Smooth cold brew concentrate", "🥤"),
                    drink("iced_latte", "Iced Latte", "Chilled latte with ice", "🥤"),
                    drink("iced_matcha", "Iced Matcha Latte", "Chilled matcha with milk", "🥤"),
                    drink(
                        "sparkling_water",
                        "Sparkling Water",
                        "Premium sparkling mineral water",
                        "🥤",
                    ),
                    drink("fresh_juice", "Fresh Juice", "Freshly squeezed orange juice", "🥤"),
                ],
            },
        }
    }

    /// Look up a category by identifier.
    #[must_use]
    pub const fn category(&self, id: CategoryId) -> &Category {
        match id {
            CategoryId::Coffee => &self.coffee,
            CategoryId::Tea => &self.tea,
            CategoryId::Softdrinks => &self.softdrinks,
        }
    }

    /// Find a drink anywhere on the menu, along with its category.
    #[must_use]
    pub fn find_drink(&self, drink_id: &str) -> Option<(CategoryId, &Drink)> {
        [CategoryId::Coffee, CategoryId::Tea, CategoryId::Softdrinks]
            .into_iter()
            .find_map(|id| {
                self.category(id)
                    .drinks
                    .iter()
                    .find(|drink| drink.id == drink_id)
                    .map(|drink| (id, drink))
            })
    }
}

// Every drink is on the house, so the price is fixed at zero.
fn drink(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    image: &'static str,
) -> Drink {
    Drink {
        id,
        name,
        description,
        price: Price::zero(),
        image,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // ===== Catalog =====

    #[test]
    fn test_standard_menu_has_twenty_drinks() {
        let menu = Menu::standard();
        let total =
            menu.coffee.drinks.len() + menu.tea.drinks.len() + menu.softdrinks.drinks.len();

        assert_eq!(menu.coffee.drinks.len(), 8);
        assert_eq!(total, 20);
    }

    #[test]
    fn test_every_drink_is_free() {
        let menu = Menu::standard();
        for category in [&menu.coffee, &menu.tea, &menu.softdrinks] {
            for drink in &category.drinks {
                assert_eq!(drink.price, Price::zero(), "{} is not free", drink.id);
            }
        }
    }

    #[test]
    fn test_drink_ids_are_unique() {
        let menu = Menu::standard();
        let mut ids: Vec<&str> = [&menu.coffee, &menu.tea, &menu.softdrinks]
            .into_iter()
            .flat_map(|category| category.drinks.iter().map(|drink| drink.id))
            .collect();
        let before = ids.len();

        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), before);
    }

    #[test]
    fn test_drink_serializes_price_as_string() {
        let menu = Menu::standard();
        let (_, espresso) = menu.find_drink("espresso").unwrap();
        let json = serde_json::to_value(espresso).unwrap();

        assert_eq!(json["price"], "0.00");
        assert_eq!(json["image"], "☕");
    }

    // ===== Lookup =====

    #[test]
    fn test_category_lookup() {
        let menu = Menu::standard();

        assert_eq!(menu.category(CategoryId::Coffee).name, "Premium Coffee");
        assert_eq!(menu.category(CategoryId::Tea).emoji, "🍵");
        assert_eq!(menu.category(CategoryId::Softdrinks).drinks.len(), 6);
    }

    #[test]
    fn test_find_drink_searches_all_categories() {
        let menu = Menu::standard();

        let (category, drink) = menu.find_drink("cold_brew").unwrap();
        assert_eq!(category, CategoryId::Softdrinks);
        assert_eq!(drink.name, "Cold Brew Coffee");

        assert!(menu.find_drink("nonexistent").is_none());
    }

    #[test]
    fn test_category_id_round_trips_through_path_form() {
        for id in [CategoryId::Coffee, CategoryId::Tea, CategoryId::Softdrinks] {
            let parsed: CategoryId = id.to_string().parse().unwrap();
            assert_eq!(parsed, id);
        }

        assert!("beer".parse::<CategoryId>().is_err());
    }

    #[test]
    fn test_category_id_serializes_lowercase() {
        let json = serde_json::to_string(&CategoryId::Softdrinks).unwrap();
        assert_eq!(json, "\"softdrinks\"");
    }
}

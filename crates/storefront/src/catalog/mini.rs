//! Built-in mini services.
//!
//! Small add-on jobs (chimney, oven, fridge cleaning) that are not part of the
//! backend catalog. They ship with the funnel, use the `mini-` id prefix, and
//! are appended to every catalog fetch so they can be booked alongside
//! regular services.

use kushi_core::{Rupees, ServiceId};

use super::Service;

/// The fixed mini-service lineup.
///
/// Ids are stable (`mini-1` .. `mini-6`); carts persisted by returning
/// visitors reference them by id.
#[must_use]
pub fn mini_services() -> Vec<Service> {
    vec![
        mini(
            "mini-1",
            "Kitchen Chimney Cleaning",
            "Kitchen",
            699,
            4.5,
            "150",
            "1 hr",
            "Professional chimney deep cleaning.",
            "https://th.bing.com/th/id/OIP.od-xJrn3Q9c-JZTOHf5glQHaE8?w=231&h=180&c=7&r=0&o=7&pid=1.7&rm=3",
        ),
        mini(
            "mini-2",
            "Micro Oven Cleaning",
            "Kitchen",
            199,
            4.6,
            "95",
            "30 min",
            "Thorough cleaning of your microwave oven.",
            "https://thumbs.dreamstime.com/b/anti-grease-spray-hand-girl-who-cleaning-kitchen-microwave-oven-dirt-modern-antistatic-agent-334440744.jpg",
        ),
        mini(
            "mini-3",
            "Exhaust Fan Cleaning",
            "Kitchen",
            299,
            4.4,
            "78",
            "45 min",
            "Deep cleaning of kitchen exhaust fan.",
            "https://www.wikihow.com/images/thumb/e/e5/Clean-a-Kitchen-Exhaust-Fan-Step-6-Version-2.jpg/v4-460px-Clean-a-Kitchen-Exhaust-Fan-Step-6-Version-2.jpg",
        ),
        mini(
            "mini-4",
            "Fridge Cleaning (150-200ltr)",
            "Appliance",
            399,
            4.7,
            "120",
            "1 hr",
            "Cleaning for small refrigerators.",
            "https://tse4.mm.bing.net/th/id/OIP.gBHvUlKTqQsxNndmeVyfpQHaHf?rs=1&pid=ImgDetMain&o=7&rm=3",
        ),
        mini(
            "mini-5",
            "Fridge Cleaning (200-500ltr)",
            "Appliance",
            549,
            4.7,
            "210",
            "1.5 hr",
            "Cleaning for medium refrigerators.",
            "https://images.airtasker.com/v7/https://airtasker-seo-assets-prod.s3.amazonaws.com/en_AU/1724116114503-fridge-cleaning.jpg",
        ),
        mini(
            "mini-6",
            "Fridge Cleaning (500-1000ltr)",
            "Appliance",
            799,
            4.8,
            "85",
            "2 hr",
            "Cleaning for large/side-by-side refrigerators.",
            "https://c8.alamy.com/comp/2GNEE46/the-man-cleaning-fridge-in-hygiene-concept-2GNEE46.jpg",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn mini(
    id: &str,
    name: &str,
    subcategory: &str,
    price: i64,
    rating: f64,
    reviews: &str,
    duration: &str,
    description: &str,
    image: &str,
) -> Service {
    let price = Rupees::from_rupees(price);
    Service {
        id: ServiceId::new(id),
        name: name.to_owned(),
        category: "Cleaning".to_owned(),
        subcategory: subcategory.to_owned(),
        price,
        original_price: price,
        rating,
        reviews: reviews.to_owned(),
        duration: duration.to_owned(),
        description: description.to_owned(),
        image: image.to_owned(),
        package: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lineup_is_stable() {
        let minis = mini_services();
        assert_eq!(minis.len(), 6);
        assert!(minis.iter().all(Service::is_mini));
        assert!(
            minis
                .iter()
                .all(|m| m.category == "Cleaning" && !m.has_packages())
        );
    }

    #[test]
    fn test_cheapest_mini() {
        let minis = mini_services();
        let cheapest = minis.iter().min_by_key(|m| m.price);
        assert_eq!(
            cheapest.map(|m| m.id.as_str()),
            Some("mini-2"),
            "micro oven cleaning should stay the cheapest add-on"
        );
    }
}

use crate::models::Listing;

/// Built-in seed catalog, shown until an external sheet replaces it.
pub fn seed_listings() -> Vec<Listing> {
    vec![
        Listing {
            id: "RM-0101".to_string(),
            title: "Apartamento moderno en Chapinero".to_string(),
            city: "Bogotá".to_string(),
            property_type: "Apartamento".to_string(),
            area_sqm: 72.0,
            bedrooms: 2,
            bathrooms: 2,
            discount_percent: 35.0,
            base_price: 245_000_000,
            auction_date: "2025-09-05".to_string(),
            address: "Cra 9 #60-12".to_string(),
            image_url: "https://images.unsplash.com/photo-1501183638710-841dd1904471?q=80&w=1600&auto=format&fit=crop".to_string(),
        },
        Listing {
            id: "RM-0102".to_string(),
            title: "Casa familiar con patio en Laureles".to_string(),
            city: "Medellín".to_string(),
            property_type: "Casa".to_string(),
            area_sqm: 180.0,
            bedrooms: 4,
            bathrooms: 3,
            discount_percent: 28.0,
            base_price: 380_000_000,
            auction_date: "2025-09-12".to_string(),
            address: "Calle 35 #78-20".to_string(),
            image_url: "https://images.unsplash.com/photo-1502005229762-cf1b2da7c52f?q=80&w=1600&auto=format&fit=crop".to_string(),
        },
        Listing {
            id: "RM-0103".to_string(),
            title: "Lote esquinero con potencial comercial".to_string(),
            city: "Cali".to_string(),
            property_type: "Lote".to_string(),
            area_sqm: 290.0,
            bedrooms: 0,
            bathrooms: 0,
            discount_percent: 42.0,
            base_price: 160_000_000,
            auction_date: "2025-08-28".to_string(),
            address: "Av. Pasoancho #56-01".to_string(),
            image_url: "https://images.unsplash.com/photo-1523217582562-09d0def993a6?q=80&w=1600&auto=format&fit=crop".to_string(),
        },
        Listing {
            id: "RM-0104".to_string(),
            title: "Apartamento con vista en El Poblado".to_string(),
            city: "Medellín".to_string(),
            property_type: "Apartamento".to_string(),
            area_sqm: 95.0,
            bedrooms: 3,
            bathrooms: 2,
            discount_percent: 31.0,
            base_price: 320_000_000,
            auction_date: "2025-09-19".to_string(),
            address: "Transv. Inferior #12-45".to_string(),
            image_url: "https://images.unsplash.com/photo-1494526585095-c41746248156?q=80&w=1600&auto=format&fit=crop".to_string(),
        },
        Listing {
            id: "RM-0105".to_string(),
            title: "Oficina luminosa en Zona T".to_string(),
            city: "Bogotá".to_string(),
            property_type: "Oficina".to_string(),
            area_sqm: 58.0,
            bedrooms: 0,
            bathrooms: 1,
            discount_percent: 22.0,
            base_price: 270_000_000,
            auction_date: "2025-09-03".to_string(),
            address: "Cll 82 #13-20".to_string(),
            image_url: "https://images.unsplash.com/photo-1517282009859-f000ec3b26cf?q=80&w=1600&auto=format&fit=crop".to_string(),
        },
    ]
}

//! Seed command - Resets the database to the demo fixture.
//!
//! Clears every table and inserts one admin, two owners, one customer
//! and six approved hotels with four rooms each. Passwords below are
//! demo credentials, printed on completion.

use uuid::Uuid;

use crate::config::Config;
use crate::domain::{Hotel, HotelDraft, Password, Room, RoomDraft, User, UserRole};
use crate::errors::AppResult;
use crate::infra::{Database, Persistence, UnitOfWork};

/// Room categories created under every hotel: label, price factor
/// applied to the hotel's nightly rate, and guest capacity.
const ROOM_TYPES: [(&str, f64, i32); 4] = [
    ("Standard", 1.0, 2),
    ("Deluxe", 1.5, 2),
    ("Suite", 2.2, 3),
    ("Royal Suite", 3.0, 4),
];

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await;
    let uow = Persistence::new(db.get_connection());

    clear(&uow).await?;

    let (owner1, owner2) = insert_users(&uow).await?;
    let hotels = insert_hotels(&uow, owner1, owner2).await?;
    insert_rooms(&uow, &hotels).await?;

    tracing::info!(hotels = hotels.len(), "database seeded");
    println!("Database seeded. Demo credentials:");
    println!("  admin:    admin@smarthotel.in / admin123");
    println!("  owner:    rajesh@smarthotel.in / owner123");
    println!("  owner:    priya@smarthotel.in / owner123");
    println!("  customer: amit@gmail.com / customer123");

    Ok(())
}

/// Drop all rows, children first so nothing dangles mid-seed.
async fn clear(uow: &Persistence) -> AppResult<()> {
    let reviews = uow.reviews().delete_all().await?;
    let bookings = uow.bookings().delete_all().await?;
    let rooms = uow.rooms().delete_all().await?;
    let hotels = uow.hotels().delete_all().await?;
    let users = uow.users().delete_all().await?;

    tracing::info!(users, hotels, rooms, bookings, reviews, "cleared existing data");
    Ok(())
}

/// Insert the four demo accounts; returns the two owner ids.
async fn insert_users(uow: &Persistence) -> AppResult<(Uuid, Uuid)> {
    let admin_hash = Password::new("admin123")?.into_string();
    let owner_hash = Password::new("owner123")?.into_string();
    let customer_hash = Password::new("customer123")?.into_string();

    let admin = User::new(
        Uuid::new_v4(),
        "Admin Sharma".into(),
        "admin@smarthotel.in".into(),
        admin_hash,
        UserRole::Admin,
        "+91 9876543210".into(),
    );
    let owner1 = User::new(
        Uuid::new_v4(),
        "Rajesh Patel".into(),
        "rajesh@smarthotel.in".into(),
        owner_hash.clone(),
        UserRole::Owner,
        "+91 9876543211".into(),
    );
    let owner2 = User::new(
        Uuid::new_v4(),
        "Priya Nair".into(),
        "priya@smarthotel.in".into(),
        owner_hash,
        UserRole::Owner,
        "+91 9876543212".into(),
    );
    let customer = User::new(
        Uuid::new_v4(),
        "Amit Kumar".into(),
        "amit@gmail.com".into(),
        customer_hash,
        UserRole::Customer,
        "+91 9876543213".into(),
    );

    let owner1_id = owner1.id;
    let owner2_id = owner2.id;

    for user in [admin, owner1, owner2, customer] {
        uow.users().create(user).await?;
    }

    Ok((owner1_id, owner2_id))
}

/// Build one seeded hotel with its marketing rating already applied.
#[allow(clippy::too_many_arguments)]
fn hotel(
    owner_id: Uuid,
    name: &str,
    description: &str,
    city: &str,
    state: &str,
    address: &str,
    price_per_night: i64,
    amenities: &[&str],
    images: &[&str],
    rating: f64,
    total_reviews: i32,
) -> Hotel {
    let mut hotel = Hotel::new(
        Uuid::new_v4(),
        owner_id,
        HotelDraft {
            name: name.into(),
            description: description.into(),
            city: city.into(),
            state: state.into(),
            address: address.into(),
            price_per_night,
            amenities: amenities.iter().map(|s| s.to_string()).collect(),
            images: images.iter().map(|s| s.to_string()).collect(),
        },
    );
    hotel.set_rating(rating, total_reviews);
    hotel
}

/// Insert the six demo hotels.
async fn insert_hotels(uow: &Persistence, owner1: Uuid, owner2: Uuid) -> AppResult<Vec<Hotel>> {
    let hotels = vec![
        hotel(
            owner1,
            "Taj Palace Heritage",
            "Experience the grandeur of royal Rajasthan at our heritage palace hotel. \
             With intricately carved sandstone facades, sprawling courtyards, and a \
             rooftop restaurant overlooking the Aravalli hills, every moment here is \
             steeped in regal elegance.",
            "Jaipur",
            "Rajasthan",
            "Amer Road, Near Jal Mahal, Jaipur 302002",
            8500,
            &["WiFi", "AC", "Pool", "Spa", "Restaurant", "Heritage Walk", "Parking"],
            &[
                "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=800",
                "https://images.unsplash.com/photo-1582719508461-905c673771fd?w=800",
            ],
            4.7,
            234,
        ),
        hotel(
            owner1,
            "Mumbai Sea View Grand",
            "A modern luxury hotel facing the Arabian Sea along Marine Drive. \
             Floor-to-ceiling windows offer breathtaking sunsets, while our \
             world-class dining and rooftop infinity pool redefine Mumbai hospitality.",
            "Mumbai",
            "Maharashtra",
            "Marine Drive, Churchgate, Mumbai 400020",
            12000,
            &["WiFi", "AC", "Pool", "Gym", "Restaurant", "Bar", "Room Service", "Laundry"],
            &[
                "https://images.unsplash.com/photo-1571896349842-33c89424de2d?w=800",
                "https://images.unsplash.com/photo-1520250497591-112f2f40a3f4?w=800",
            ],
            4.5,
            189,
        ),
        hotel(
            owner2,
            "Kerala Backwater Resort",
            "Nestled among the serene backwaters of Alleppey, our eco-luxury resort \
             offers traditional Kerala architecture blended with modern comforts. Wake \
             up to birdsong, enjoy Ayurvedic spa treatments, and cruise the backwaters \
             on our private houseboat.",
            "Kerala",
            "Kerala",
            "Alleppey Backwaters, Alappuzha, Kerala 688001",
            6500,
            &["WiFi", "AC", "Ayurvedic Spa", "Restaurant", "Yoga Center", "Pool"],
            &[
                "https://images.unsplash.com/photo-1551882547-ff40c63fe5fa?w=800",
                "https://images.unsplash.com/photo-1542314831-068cd1dbfeeb?w=800",
            ],
            4.8,
            312,
        ),
        hotel(
            owner2,
            "Goa Beach Paradise",
            "A vibrant beachside resort in South Goa where Portuguese heritage meets \
             tropical charm. Steps from pristine Palolem beach, our resort features \
             open-air dining, live music evenings, and luxurious cottages surrounded \
             by palm groves.",
            "Goa",
            "Goa",
            "Palolem Beach, Canacona, Goa 403702",
            5500,
            &["WiFi", "AC", "Pool", "Bar", "Restaurant", "Pet Friendly", "Parking"],
            &[
                "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=800",
                "https://images.unsplash.com/photo-1520250497591-112f2f40a3f4?w=800",
            ],
            4.3,
            156,
        ),
        hotel(
            owner1,
            "Delhi Imperial Suites",
            "Located in the heart of Lutyens' Delhi, our premium hotel offers colonial \
             elegance with contemporary luxury. Walking distance to India Gate and \
             Connaught Place, it's the perfect base for exploring the capital.",
            "Delhi",
            "Delhi",
            "Janpath, Connaught Place, New Delhi 110001",
            9500,
            &[
                "WiFi",
                "AC",
                "Gym",
                "Restaurant",
                "Bar",
                "Room Service",
                "Airport Shuttle",
                "Laundry",
            ],
            &[
                "https://images.unsplash.com/photo-1582719508461-905c673771fd?w=800",
                "https://images.unsplash.com/photo-1571896349842-33c89424de2d?w=800",
            ],
            4.4,
            201,
        ),
        hotel(
            owner2,
            "Varanasi Ganga View",
            "A spiritual retreat overlooking the sacred ghats of Varanasi. Watch the \
             mesmerizing Ganga Aarti from your room, explore ancient temples, and \
             experience the soul of India in this boutique heritage hotel.",
            "Varanasi",
            "Uttar Pradesh",
            "Dashashwamedh Ghat Road, Varanasi 221001",
            4500,
            &["WiFi", "AC", "Restaurant", "Yoga Center", "Heritage Walk", "Room Service"],
            &[
                "https://images.unsplash.com/photo-1551882547-ff40c63fe5fa?w=800",
                "https://images.unsplash.com/photo-1542314831-068cd1dbfeeb?w=800",
            ],
            4.6,
            178,
        ),
    ];

    let mut created = Vec::with_capacity(hotels.len());
    for hotel in hotels {
        created.push(uow.hotels().create(hotel).await?);
    }

    Ok(created)
}

/// Insert the standard room ladder under every hotel.
async fn insert_rooms(uow: &Persistence, hotels: &[Hotel]) -> AppResult<()> {
    for hotel in hotels {
        for (room_type, factor, capacity) in ROOM_TYPES {
            let price = (hotel.price_per_night as f64 * factor).round() as i64;
            let room = Room::new(
                Uuid::new_v4(),
                RoomDraft {
                    hotel_id: hotel.id,
                    room_type: room_type.into(),
                    price,
                    capacity,
                    description: format!(
                        "{room_type} room with premium amenities and {capacity} guest capacity."
                    ),
                    images: hotel.images.clone(),
                },
            );
            uow.rooms().create(room).await?;
        }
    }

    Ok(())
}

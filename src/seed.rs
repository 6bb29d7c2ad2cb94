//! Startup bootstrap with the sample data set.
//!
//! Each collection is only filled when it is empty, so running this on every
//! start is harmless. Products are stored through
//! [`CatalogService::create_product`] like any other client would.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set, TransactionTrait,
};
use thiserror::Error;
use tracing::info;

use crate::catalog::{CatalogError, CatalogService, NewCategory, NewCity, NewFeature, ProductSpec};
use crate::config::SeedConfig;
use crate::entities::{
    category, city, feature, product,
    user::{self, hash_password, Role},
};

#[derive(Error, Debug)]
pub enum SeedError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    #[error("Failed to hash seed password: {0}")]
    PasswordHash(String),
    #[error("Seed data refers to unknown {0}")]
    MissingReference(String),
    #[error("Seed data has an invalid date: 2025-{0:02}-{1:02}")]
    InvalidDate(u32, u32),
}

const CITIES: &[(&str, &str)] = &[
    ("París", "Francia"),
    ("Londres", "Reino Unido"),
    ("Roma", "Italia"),
    ("Cuzco", "Perú"),
    ("Mar de Cortés", "Océano Pacífico"),
    ("Tokyo", "Japón"),
    ("Agra", "India"),
    ("Ica", "Perú"),
];

const CATEGORIES: &[(&str, &str, &str)] = &[
    (
        "Gastronomía",
        "Explora experiencias culinarias y sabores únicos.",
        "https://res.cloudinary.com/dfmov5uj0/image/upload/f_auto,q_auto/v1/categories/rgdvhvznmar7r1zelz1o",
    ),
    (
        "Cultura",
        "Sumérgete en la historia, el arte y las tradiciones locales.",
        "https://res.cloudinary.com/dfmov5uj0/image/upload/f_auto,q_auto/v1/categories/oy0hfivp8kzhroy8nek2",
    ),
    (
        "Aventura",
        "Vive experiencias llenas de adrenalina y exploración.",
        "https://res.cloudinary.com/dfmov5uj0/image/upload/f_auto,q_auto/v1/categories/sjycq2srixpvmvjtk4tu",
    ),
    (
        "Tour",
        "Descubre nuevos destinos con recorridos guiados.",
        "https://res.cloudinary.com/dfmov5uj0/image/upload/f_auto,q_auto/v1/categories/sfzucuka6ed34vkaamh0",
    ),
];

const FEATURES: &[(&str, &str)] = &[
    ("Familias", "https://img.icons8.com/?size=26&id=6880&format=png"),
    ("Sea Lovers", "https://img.icons8.com/?size=50&id=aDhl4dThqSY6&format=png"),
    ("Activo", "https://img.icons8.com/?size=24&id=0Az5RrjFrZpO&format=png"),
    ("Grupos pequeños", "https://img.icons8.com/?size=24&id=u9iFuoXqgfLU&format=png"),
    ("3 Horas", "https://img.icons8.com/?size=24&id=QECUQIt2LlW8&format=png"),
];

struct SampleProduct {
    title: &'static str,
    description: &'static str,
    price: f64,
    capacity: i32,
    city: &'static str,
    category: &'static str,
    features: &'static [&'static str],
    images: &'static [&'static str],
    // (month, day) in 2025
    dates: &'static [(u32, u32)],
}

const ADDRESS: &str = "Calle Digital House 123, Certified Tech Developer";

const PRODUCTS: &[SampleProduct] = &[
    SampleProduct {
        title: "Paseo en barco por el Sena",
        description: "Tanto de día como de noche, dar un paseo en barco por el Sena es imprescindible para descubrir la belleza de París desde una perspectiva única. La embarcación es panorámica e incluye comentarios en español.",
        price: 180.0,
        capacity: 20,
        city: "París",
        category: "Tour",
        features: &["Familias", "Grupos pequeños"],
        images: &[
            "https://estoesfrancia.com/wp-content/uploads/2024/04/paseo-por-el-sena-atardecer.jpg",
            "https://estoesfrancia.com/wp-content/uploads/2024/04/paseo-por-el-sena-atardecer.jpg",
            "https://estoesfrancia.com/wp-content/uploads/2024/04/paseo-por-el-sena-atardecer.jpg",
            "https://estoesfrancia.com/wp-content/uploads/2024/04/paseo-por-el-sena-atardecer.jpg",
            "https://estoesfrancia.com/wp-content/uploads/2024/04/paseo-por-el-sena-atardecer.jpg",
            "https://estoesfrancia.com/wp-content/uploads/2024/04/paris-de-noche-rio-sena.jpg",
            "https://aws-tiqets-cdn.imgix.net/images/content/e6865f6dc1754bf79f4f96aa5fab07bf.jpeg",
            "https://aws-tiqets-cdn.imgix.net/images/content/e6a2ad487dfe46d38df7015a6f0660ac.jpeg",
            "https://aws-tiqets-cdn.imgix.net/images/content/0a593f37fd484f949e6d384dfc9adf21.jpeg",
        ],
        dates: &[(4, 1), (4, 3), (4, 5), (4, 8), (4, 10)],
    },
    SampleProduct {
        title: "Tour gastronómico por el barrio del Trastevere",
        description: "Helados, pizzas, vinos… Deleita tú paladar con las delicias gastronómicas del Trastevere, el barrio bohemio de Roma. ¡Culminarás este tour con un gran sabor de boca!",
        price: 30.55,
        capacity: 10,
        city: "Roma",
        category: "Gastronomía",
        features: &["Familias", "Grupos pequeños"],
        images: &[
            "https://cdn.getyourguide.com/img/tour/5c1fc320c7e514a45bb9683adff46e456d37899a02e9bc786f2445a1147874fd.jpg/145.jpg",
            "https://cdn.getyourguide.com/img/tour/5c1fc320c7e514a45bb9683adff46e456d37899a02e9bc786f2445a1147874fd.jpg/145.jpg",
            "https://cdn.getyourguide.com/img/tour/5c1fc320c7e514a45bb9683adff46e456d37899a02e9bc786f2445a1147874fd.jpg/145.jpg",
            "https://cdn.getyourguide.com/img/tour/5c1fc320c7e514a45bb9683adff46e456d37899a02e9bc786f2445a1147874fd.jpg/145.jpg",
            "https://cdn.getyourguide.com/img/tour/5c1fc320c7e514a45bb9683adff46e456d37899a02e9bc786f2445a1147874fd.jpg/145.jpg",
            "https://cdn.getyourguide.com/img/tour/ab0d23a20d3b189aba0595b406eb3c6cf209f5d69092096233170224ffc4fc26.jpg/146.jpg",
        ],
        dates: &[(4, 2), (4, 4), (4, 8), (4, 10), (4, 13)],
    },
    SampleProduct {
        title: "Machu Picchu - Tour de Día Completo en Tren Panorámico",
        description: "Machu Picchu,declarado patrimonio cultural de la humanidad por la UNESCO se considera uno de los lugares de interes mundial mas importantes que tiene que visitar en PERU.",
        price: 200.0,
        capacity: 15,
        city: "Cuzco",
        category: "Cultura",
        features: &["3 Horas"],
        images: &[
            "https://media-cdn.tripadvisor.com/media/attractions-splice-spp-720x480/10/19/21/1e.jpg",
            "https://media-cdn.tripadvisor.com/media/attractions-splice-spp-720x480/10/19/21/1e.jpg",
            "https://media-cdn.tripadvisor.com/media/attractions-splice-spp-720x480/10/19/21/1e.jpg",
            "https://media-cdn.tripadvisor.com/media/attractions-splice-spp-720x480/10/19/21/1e.jpg",
            "https://media-cdn.tripadvisor.com/media/attractions-splice-spp-720x480/10/19/21/1e.jpg",
            "https://media-cdn.tripadvisor.com/media/attractions-splice-spp-720x480/10/73/5c/e6.jpg",
            "https://media-cdn.tripadvisor.com/media/attractions-splice-spp-720x480/10/19/20/ee.jpg",
            "https://media-cdn.tripadvisor.com/media/attractions-splice-spp-720x480/0a/84/77/7a.jpg",
            "https://media-cdn.tripadvisor.com/media/attractions-splice-spp-720x480/0f/40/75/ea.jpg",
            "https://media-cdn.tripadvisor.com/media/attractions-splice-spp-720x480/0f/40/75/e3.jpg",
        ],
        dates: &[(4, 1), (4, 2), (4, 3), (4, 6), (4, 8), (4, 10)],
    },
    SampleProduct {
        title: "Snorkel en Cabo San Lucas",
        description: "¡Embárcate en una emocionante travesía con nuestro tour de snorkel en Cabo y visita al Arco del fin del mundo! Experimenta la emoción de tu vida mientras embarcaciones de alta velocidad te llevan al Arco, la Playa del Amor.",
        price: 120.0,
        capacity: 10,
        city: "Mar de Cortés",
        category: "Aventura",
        features: &["Sea Lovers", "Activo"],
        images: &[
            "https://cdn.sanity.io/images/esqfj3od/production/f59bbcf10768d457b9111b12d140ed32b98ba8d3-2132x1200.webp",
            "https://cdn.sanity.io/images/esqfj3od/production/f59bbcf10768d457b9111b12d140ed32b98ba8d3-2132x1200.webp",
            "https://cdn.sanity.io/images/esqfj3od/production/f59bbcf10768d457b9111b12d140ed32b98ba8d3-2132x1200.webp",
            "https://cdn.sanity.io/images/esqfj3od/production/f59bbcf10768d457b9111b12d140ed32b98ba8d3-2132x1200.webp",
            "https://cdn.sanity.io/images/esqfj3od/production/f59bbcf10768d457b9111b12d140ed32b98ba8d3-2132x1200.webp",
            "https://cdn.sanity.io/images/esqfj3od/production/76365353ee15691499f4568b6f348410c93f616b-2132x1200.webp",
            "https://cdn.sanity.io/images/esqfj3od/production/49c73643286f7d5793233730980dc635a747be5e-1080x1630.webp",
            "https://cdn.sanity.io/images/esqfj3od/production/53a20d929a2e010b8bee499dc50623b4a8aeea5d-1080x1630.webp",
        ],
        dates: &[(4, 1), (4, 4), (4, 8), (4, 12), (4, 15), (4, 17)],
    },
    SampleProduct {
        title: "Barrio de Asakusa",
        description: "La atmósfera del barrio de Asakusa te transportará al antiguo Tokyo. La atracción principal de esta zona es el Templo Sensoji, uno de los templos budistas más famosos de Japón.",
        price: 180.0,
        capacity: 30,
        city: "Tokyo",
        category: "Cultura",
        features: &["3 Horas"],
        images: &[
            "https://guiadejapon.es/img/tokyo_templo-sensoji.jpg",
            "https://guiadejapon.es/img/tokyo_templo-sensoji.jpg",
            "https://guiadejapon.es/img/tokyo_templo-sensoji.jpg",
            "https://guiadejapon.es/img/tokyo_templo-sensoji.jpg",
            "https://guiadejapon.es/img/tokyo_templo-sensoji.jpg",
            "https://japon-secreto.com/wp-content/uploads/2024/06/asakusa-sensoji02-1068x744.webp",
            "https://japon-secreto.com/wp-content/uploads/2024/05/JP2008P1020897-jpg.webp",
            "https://dynamic-media-cdn.tripadvisor.com/media/photo-o/11/89/1f/53/caption.jpg",
            "https://dynamic-media-cdn.tripadvisor.com/media/photo-o/10/6d/df/3a/caption.jpg",
        ],
        dates: &[(4, 2), (4, 5), (4, 6), (4, 10), (4, 15), (4, 17)],
    },
    SampleProduct {
        title: "Tour en autobús de té por la tarde de Peppa Pig con audioguía",
        description: "Vea lo mejor de Londres mientras viaja a bordo de un icónico autobús Routemaster de dos pisos. Disfrute de una experiencia de té con temática vespertina de Peppa Pig con delicias tradicionales británicas y bebidas calientes ilimitadas.",
        price: 90.0,
        capacity: 25,
        city: "Londres",
        category: "Tour",
        features: &["Familias", "3 Horas"],
        images: &[
            "https://cdn.getyourguide.com/img/tour/642ad74c100f4.jpeg/98.jpg",
            "https://cdn.getyourguide.com/img/tour/642ad74c100f4.jpeg/98.jpg",
            "https://cdn.getyourguide.com/img/tour/642ad74c100f4.jpeg/98.jpg",
            "https://cdn.getyourguide.com/img/tour/642ad74c100f4.jpeg/98.jpg",
            "https://cdn.getyourguide.com/img/tour/642ad74c100f4.jpeg/98.jpg",
            "https://cdn.getyourguide.com/img/tour/642ad74c09c36.jpeg/145.jpg",
            "https://cdn.getyourguide.com/img/tour/642ad74c04828.jpeg/145.jpg",
            "https://cdn.getyourguide.com/img/review/47914883aacbacc765411f8ef6e0be2ad0a903f81138756e5a27f11b7d79675c.jpg/145.jpg",
        ],
        dates: &[(4, 1), (4, 4), (4, 6), (4, 7), (4, 9), (4, 11)],
    },
    // Stored under Londres in the original data set, kept as is.
    SampleProduct {
        title: "Velero de Lujo al Atardecer en Los Cabos",
        description: "Disfruta de una de las impresionantes puestas de sol de Los Cabos a bordo de nuestros lujosos veleros y catamaranes franceses. Relájate y desconéctate mientras disfrutas de deliciosos aperitivos, barra libre premium y el excepcional servicio de nuestra tripulación.",
        price: 799.99,
        capacity: 5,
        city: "Londres",
        category: "Tour",
        features: &["Familias", "3 Horas"],
        images: &[
            "https://cdn.sanity.io/images/esqfj3od/production/8a2743bb194801ecd04c687b6c4d68a38a6774eb-2132x1200.webp",
            "https://cdn.sanity.io/images/esqfj3od/production/38350d4b42d2309d2c1aa69532a8d4ee91c1cba7-1080x1630.webp",
            "https://cdn.sanity.io/images/esqfj3od/production/c039f07cac8a32ccc39e375a5ca2a9dbc195b443-2132x1200.webp",
            "https://cdn.sanity.io/images/esqfj3od/production/c039f07cac8a32ccc39e375a5ca2a9dbc195b443-2132x1200.webp",
            "https://cdn.sanity.io/images/esqfj3od/production/38350d4b42d2309d2c1aa69532a8d4ee91c1cba7-1080x1630.webp",
            "https://cdn.sanity.io/images/esqfj3od/production/8a2743bb194801ecd04c687b6c4d68a38a6774eb-2132x1200.webp",
            "https://cdn.sanity.io/images/esqfj3od/production/8a2743bb194801ecd04c687b6c4d68a38a6774eb-2132x1200.webp",
        ],
        dates: &[(4, 1), (4, 4), (4, 6), (4, 7), (4, 10), (4, 13)],
    },
    SampleProduct {
        title: "Oasis de Huacachina",
        description: "No te puedes perder el tour de areneros y sandboarding. La visita a un viñedo de Pisco también es recomendada para los viajeros.",
        price: 99.99,
        capacity: 20,
        city: "Ica",
        category: "Tour",
        features: &["Familias", "3 Horas"],
        images: &[
            "https://www.huacachina.com/wp-content/uploads/2020/03/huacachina-header.png",
            "https://www.huacachina.com/wp-content/uploads/2023/04/huacachina-oasis.jpg",
            "https://www.huacachina.com/wp-content/uploads/2023/04/how-to-get-to-huacachina.jpg",
            "https://www.huacachina.com/wp-content/uploads/2023/04/dunebuggy-sandboarding.jpg",
            "https://www.peruhop.com/wp-content/uploads/1-day-pic-1.jpg",
            "https://www.huacachina.com/wp-content/uploads/2020/03/huacachina-header.png",
            "https://www.huacachina.com/wp-content/uploads/2023/04/huacachina-oasis.jpg",
        ],
        dates: &[(4, 1), (4, 2), (4, 5), (4, 7), (4, 9), (4, 12)],
    },
    SampleProduct {
        title: "Excursión al Taj Mahal el mismo día en coche desde Delhi",
        description: "Ninguna visita a la India está completa sin ver el Taj Mahal, una de las Siete Maravillas del Mundo, pero a veces el tiempo limitado puede hacer que una excursión de un día desde Delhi parezca imposible.",
        price: 120.55,
        capacity: 20,
        city: "Agra",
        category: "Tour",
        features: &["Familias", "3 Horas"],
        images: &[
            "https://media-cdn.tripadvisor.com/media/attractions-splice-spp-720x480/12/65/2a/c3.jpg",
            "https://media-cdn.tripadvisor.com/media/attractions-splice-spp-720x480/12/65/2a/d0.jpg",
            "https://media-cdn.tripadvisor.com/media/attractions-splice-spp-720x480/12/65/2a/d1.jpg",
            "https://media-cdn.tripadvisor.com/media/attractions-splice-spp-720x480/12/5c/af/78.jpg",
            "https://media-cdn.tripadvisor.com/media/attractions-splice-spp-720x480/12/5c/af/7a.jpg",
            "https://media-cdn.tripadvisor.com/media/attractions-splice-spp-720x480/12/65/2a/d7.jpg",
            "https://dynamic-media-cdn.tripadvisor.com/media/photo-o/2e/6a/2b/74/caption.jpg",
            "https://media-cdn.tripadvisor.com/media/attractions-splice-spp-720x480/0e/4d/0a/0c.jpg",
        ],
        dates: &[(4, 1), (4, 2), (4, 4), (4, 8), (4, 10), (4, 12)],
    },
];

/// Fills every empty collection with the sample data set.
pub async fn bootstrap(catalog: &CatalogService, config: &SeedConfig) -> Result<(), SeedError> {
    let db = catalog.db();

    if user::Entity::find().count(db).await? == 0 {
        insert_users(db, config).await?;
    }
    if city::Entity::find().count(db).await? == 0 {
        for (name, country) in CITIES {
            catalog
                .create_city(NewCity {
                    name: name.to_string(),
                    country: country.to_string(),
                })
                .await?;
        }
        info!(count = CITIES.len(), "Seeded cities");
    }
    if category::Entity::find().count(db).await? == 0 {
        for (title, description, image_url) in CATEGORIES {
            catalog
                .create_category(NewCategory::new(*title, *description, *image_url))
                .await?;
        }
        info!(count = CATEGORIES.len(), "Seeded categories");
    }
    if feature::Entity::find().count(db).await? == 0 {
        for (name, icon_url) in FEATURES {
            catalog
                .create_feature(NewFeature {
                    name: name.to_string(),
                    icon_url: icon_url.to_string(),
                })
                .await?;
        }
        info!(count = FEATURES.len(), "Seeded features");
    }
    if product::Entity::find().count(db).await? == 0 {
        for sample in PRODUCTS {
            let spec = resolve(db, sample).await?;
            catalog.create_product(spec).await?;
        }
        info!(count = PRODUCTS.len(), "Seeded products");
    }

    Ok(())
}

async fn insert_users(db: &DatabaseConnection, config: &SeedConfig) -> Result<(), SeedError> {
    let admin_hash =
        hash_password(&config.admin_password).map_err(|e| SeedError::PasswordHash(e.to_string()))?;
    let user_hash =
        hash_password(&config.user_password).map_err(|e| SeedError::PasswordHash(e.to_string()))?;

    let admin = user::ActiveModel {
        email: Set("admin@admin.com".to_owned()),
        password: Set(admin_hash),
        firstname: Set("admin".to_owned()),
        lastname: Set("admin".to_owned()),
        role: Set(Role::SuperAdmin),
        ..Default::default()
    };
    let regular = user::ActiveModel {
        email: Set("user@user.com".to_owned()),
        password: Set(user_hash),
        firstname: Set("user".to_owned()),
        lastname: Set("user".to_owned()),
        role: Set(Role::User),
        ..Default::default()
    };

    let txn = db.begin().await?;
    admin.insert(&txn).await?;
    regular.insert(&txn).await?;
    txn.commit().await?;

    info!("Seeded users");
    Ok(())
}

/// Turns the name-based sample into a `ProductSpec` with the ids stored in `db`.
async fn resolve(db: &DatabaseConnection, sample: &SampleProduct) -> Result<ProductSpec, SeedError> {
    let city = city::Entity::find()
        .filter(city::Column::Name.eq(sample.city))
        .one(db)
        .await?
        .ok_or_else(|| SeedError::MissingReference(format!("city '{}'", sample.city)))?;
    let category = category::Entity::find()
        .filter(category::Column::Title.eq(sample.category))
        .one(db)
        .await?
        .ok_or_else(|| SeedError::MissingReference(format!("category '{}'", sample.category)))?;

    let mut feature_ids = Vec::with_capacity(sample.features.len());
    for name in sample.features {
        let feature = feature::Entity::find()
            .filter(feature::Column::Name.eq(*name))
            .one(db)
            .await?
            .ok_or_else(|| SeedError::MissingReference(format!("feature '{name}'")))?;
        feature_ids.push(feature.id);
    }

    let availability = sample
        .dates
        .iter()
        .map(|&(month, day)| {
            NaiveDate::from_ymd_opt(2025, month, day)
                .ok_or(SeedError::InvalidDate(month, day))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ProductSpec {
        title: sample.title.to_owned(),
        description: sample.description.to_owned(),
        price: sample.price,
        capacity: sample.capacity,
        address: ADDRESS.to_owned(),
        city_id: city.id,
        category_id: Some(category.id),
        image_urls: sample.images.iter().map(|url| url.to_string()).collect(),
        feature_ids,
        availability,
    })
}

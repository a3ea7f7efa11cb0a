//! Fixed fallback content for storefronts.
//!
//! Every field here is non-empty. Any field a tenant leaves blank renders
//! the baseline value instead, so a storefront never shows a hole.

use std::sync::LazyLock;

use shopifake_core::{DEFAULT_DRAFT_COLOR, SiteDraft, Values};

use super::{
    AboutHero, AboutPage, AboutStory, Branding, ButtonStyle, CategoriesPage, ContactSection,
    HomeHero, HomePage, Navigation, ProductCardStyle, StorefrontConfig, Theme, ValueStatement,
};

static BASELINE: LazyLock<StorefrontConfig> = LazyLock::new(build_baseline);

/// The baseline every storefront is laid over.
#[must_use]
pub fn mock_storefront_config() -> &'static StorefrontConfig {
    &BASELINE
}

fn build_baseline() -> StorefrontConfig {
    StorefrontConfig {
        branding: Branding {
            name: "Shopifake Boutique".to_string(),
            tagline: "Small shop, big heart".to_string(),
            logo_url: "/static/images/baseline/logo.svg".to_string(),
            icon: "SB".to_string(),
        },
        navigation: Navigation {
            home_label: "Home".to_string(),
            categories_label: "Categories".to_string(),
            about_label: "About".to_string(),
            link_class: "sf-nav__link".to_string(),
            hover_class: "sf-nav__link--underline".to_string(),
        },
        home: HomePage {
            hero: HomeHero {
                banner_url: "/static/images/baseline/banner.svg".to_string(),
                title: "Welcome to our shop".to_string(),
                subtitle: "Handpicked goods, shipped with care".to_string(),
                description:
                    "Browse our latest arrivals and find something you will keep for years."
                        .to_string(),
                cta_label: "Shop now".to_string(),
            },
            product_card: ProductCardStyle {
                container_class: "sf-card".to_string(),
                title_class: "sf-card__title".to_string(),
                price_class: "sf-card__price".to_string(),
                button_class: "sf-button sf-button--primary".to_string(),
                button_label: "Add to cart".to_string(),
            },
        },
        categories: CategoriesPage {
            title: "Categories".to_string(),
            subtitle: "Find what you are looking for".to_string(),
            empty_message: "New collections are on their way.".to_string(),
        },
        about: AboutPage {
            hero: AboutHero {
                title: "Our story".to_string(),
                subtitle: "The people behind the shop".to_string(),
                image_url: "/static/images/baseline/about-hero.svg".to_string(),
            },
            story: AboutStory {
                heading: "How it started".to_string(),
                body: "We started in a spare room with a handful of products we loved. \
                       Today we still pack every order ourselves."
                    .to_string(),
                portrait_url: "/static/images/baseline/portrait-1.svg".to_string(),
                secondary_portrait_url: "/static/images/baseline/portrait-2.svg".to_string(),
            },
            values: vec![
                ValueStatement {
                    icon: "leaf".to_string(),
                    title: "Sustainability".to_string(),
                    description: "Materials chosen to last and packaging that can be recycled."
                        .to_string(),
                },
                ValueStatement {
                    icon: "star".to_string(),
                    title: "Quality".to_string(),
                    description: "Every product is tested before it reaches our shelves."
                        .to_string(),
                },
                ValueStatement {
                    icon: "heart".to_string(),
                    title: "Care".to_string(),
                    description: "A real person answers every message we receive.".to_string(),
                },
                ValueStatement {
                    icon: "users".to_string(),
                    title: "Community".to_string(),
                    description: "We work with local makers and share what we learn."
                        .to_string(),
                },
            ],
            contact: ContactSection {
                heading: "Get in touch".to_string(),
                description: "Questions about an order or a product? We are happy to help."
                    .to_string(),
                details: vec![
                    "hello@shopifake.com".to_string(),
                    "+33 1 23 45 67 89".to_string(),
                    "12 rue du Commerce, Paris".to_string(),
                ],
                note: "We reply within two business days.".to_string(),
            },
        },
        account: ButtonStyle {
            label: "Account".to_string(),
            class: "sf-button sf-button--ghost".to_string(),
        },
        cart: ButtonStyle {
            label: "Cart".to_string(),
            class: "sf-button sf-button--accent".to_string(),
        },
        theme: Theme {
            primary_color: "#1f2937".to_string(),
            secondary_color: "#f59e0b".to_string(),
            wrapper_class: "sf-theme".to_string(),
            accent_class: "sf-accent".to_string(),
        },
    }
}

/// Draft shown in preview when there is nothing else to show.
#[must_use]
pub fn demo_draft() -> SiteDraft {
    SiteDraft {
        name: "Demo Studio".to_string(),
        tagline: "Everyday objects, made by hand".to_string(),
        hero_title: "Welcome to Demo Studio".to_string(),
        hero_subtitle: "A sample storefront".to_string(),
        hero_description: "This is how your shop will look once it is set up."
            .to_string(),
        about_title: "Our story".to_string(),
        about_story: "Demo Studio shows every section a Shopifake storefront offers.".to_string(),
        values: Values::from_iter_padded([
            "Materials that last.",
            "Quality we check by hand.",
            "Service that listens.",
            "Makers from around the corner.",
        ]),
        contact_heading: "Contact us".to_string(),
        contact_description: "Drop us a line, we answer quickly.".to_string(),
        contact_details: "demo@shopifake.com\n+33 1 00 00 00 00".to_string(),
        contact_note: "This is a demo shop, no orders will ship.".to_string(),
        primary_color: DEFAULT_DRAFT_COLOR.to_string(),
        secondary_color: BASELINE.theme.secondary_color.clone(),
        ..SiteDraft::default()
    }
}

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use minijinja::{context, AutoEscape, Environment};
use serde::Serialize;

use crate::core::error::{AppError, Result};
use crate::features::catalog::CatalogService;

const SITE_BASE_URL: &str = "https://myesimplus.com";

const INDEX_TEMPLATE: &str = "index.html";
const SITEMAP_TEMPLATE: &str = "sitemap.xml";
const NOT_FOUND_TEMPLATE: &str = "not_found.html";

#[derive(Serialize)]
struct SitemapPage {
    path: &'static str,
    priority: &'static str,
}

const SITEMAP_PAGES: &[SitemapPage] = &[
    SitemapPage {
        path: "/",
        priority: "1.0",
    },
    SitemapPage {
        path: "/plans",
        priority: "0.8",
    },
];

/// Renders the site's pages from the embedded templates
pub struct SiteService {
    env: Environment<'static>,
    catalog: Arc<CatalogService>,
}

impl SiteService {
    pub fn new(catalog: Arc<CatalogService>) -> std::result::Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        // Sitemap URLs must come out verbatim
        env.set_auto_escape_callback(|name| {
            if name.ends_with(".html") {
                AutoEscape::Html
            } else {
                AutoEscape::None
            }
        });
        env.add_template(
            INDEX_TEMPLATE,
            include_str!("../../../../templates/site/index.html.jinja"),
        )?;
        env.add_template(
            SITEMAP_TEMPLATE,
            include_str!("../../../../templates/site/sitemap.xml.jinja"),
        )?;
        env.add_template(
            NOT_FOUND_TEMPLATE,
            include_str!("../../../../templates/site/not_found.html.jinja"),
        )?;

        Ok(Self { env, catalog })
    }

    /// Landing page with the plan catalog and coverage rendered in
    pub fn render_index(&self) -> Result<String> {
        let coverage = self.catalog.coverage();

        self.render(
            INDEX_TEMPLATE,
            context! {
                plans => self.catalog.list_plans(),
                regions => coverage.regions,
                total_countries => coverage.total_countries,
                year => Utc::now().year(),
            },
        )
    }

    pub fn render_sitemap(&self, today: NaiveDate) -> Result<String> {
        self.render(
            SITEMAP_TEMPLATE,
            context! {
                base_url => SITE_BASE_URL,
                lastmod => today.format("%Y-%m-%d").to_string(),
                pages => SITEMAP_PAGES,
            },
        )
    }

    pub fn render_not_found(&self) -> Result<String> {
        self.render(NOT_FOUND_TEMPLATE, context! {})
    }

    pub fn robots(&self) -> &'static str {
        include_str!("../../../../templates/site/robots.txt")
    }

    fn render(&self, name: &str, ctx: minijinja::Value) -> Result<String> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(ctx))
            .map_err(|e| AppError::Internal(format!("Failed to render '{}': {}", name, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> SiteService {
        SiteService::new(Arc::new(CatalogService::new())).unwrap()
    }

    #[test]
    fn test_index_lists_every_plan() {
        let html = service().render_index().unwrap();

        for name in [
            "Basic Traveler",
            "Premium Explorer",
            "Enterprise Global",
            "Unlimited Pro",
        ] {
            assert!(html.contains(name), "missing {}", name);
        }
        assert!(html.contains("$19.99"));
        assert!(html.contains("plan-card popular"));
        assert!(html.contains("/static/styles.css"));
    }

    #[test]
    fn test_sitemap_uses_given_date() {
        let xml = service()
            .render_sitemap(NaiveDate::from_ymd_opt(2025, 2, 3).unwrap())
            .unwrap();

        assert!(xml.starts_with("<?xml"));
        assert_eq!(xml.matches("<lastmod>2025-02-03</lastmod>").count(), 2);
        assert!(xml.contains("<loc>https://myesimplus.com/plans</loc>"));
    }

    #[test]
    fn test_robots_hides_api() {
        let robots = service().robots();
        assert!(robots.contains("Disallow: /api/"));
        assert!(robots.contains("Disallow: /admin/"));
    }
}

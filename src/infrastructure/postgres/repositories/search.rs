use diesel::{
    dsl::{Desc, InnerJoinQuerySource, sql},
    pg::Pg,
    prelude::*,
    sql_types::{Bool, Text},
};

use crate::infrastructure::postgres::schema::{customers, invoices, reviews};

pub type InvoiceSearchSource = InnerJoinQuerySource<invoices::table, customers::table>;
pub type ReviewSearchSource = InnerJoinQuerySource<reviews::table, customers::table>;

/// Newest first. Rows sharing a date are ordered by id so OFFSET pages never overlap.
pub fn invoice_listing_order() -> (Desc<invoices::date>, Desc<invoices::id>) {
    (invoices::date.desc(), invoices::id.desc())
}

pub fn review_listing_order() -> (Desc<reviews::updated_at>, Desc<reviews::id>) {
    (reviews::updated_at.desc(), reviews::id.desc())
}

/// `ILIKE` match over the invoice table view. Listing and counting both filter with this.
pub fn invoice_search(
    pattern: String,
) -> Box<dyn BoxableExpression<InvoiceSearchSource, Pg, SqlType = Bool>> {
    Box::new(
        customers::name
            .ilike(pattern.clone())
            .or(customers::email.ilike(pattern.clone()))
            .or(sql::<Text>("invoices.amount::text").ilike(pattern.clone()))
            .or(sql::<Text>("invoices.date::text").ilike(pattern.clone()))
            .or(invoices::status.ilike(pattern)),
    )
}

/// `ILIKE` match over the review table view. Listing and counting both filter with this.
pub fn review_search(
    pattern: String,
) -> Box<dyn BoxableExpression<ReviewSearchSource, Pg, SqlType = Bool>> {
    Box::new(
        customers::name
            .ilike(pattern.clone())
            .or(customers::email.ilike(pattern.clone()))
            .or(sql::<Text>("reviews.created_at::text").ilike(pattern.clone()))
            .or(sql::<Text>("reviews.updated_at::text").ilike(pattern.clone()))
            .or(reviews::title.ilike(pattern.clone()))
            .or(reviews::status.ilike(pattern)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::debug_query;

    #[test]
    fn invoice_search_binds_pattern_and_casts_columns() {
        let query = invoices::table
            .inner_join(customers::table)
            .filter(invoice_search("%42%".to_string()))
            .select(invoices::id);
        let rendered = debug_query::<Pg, _>(&query).to_string();

        assert!(rendered.contains("invoices.amount::text ILIKE $3"));
        assert!(rendered.contains("invoices.date::text ILIKE $4"));
        assert!(!rendered.contains("'%42%'"));
        assert!(rendered.contains("\"%42%\""));
    }

    #[test]
    fn review_search_covers_title_and_status() {
        let query = reviews::table
            .inner_join(customers::table)
            .filter(review_search("%ride%".to_string()))
            .select(reviews::id);
        let rendered = debug_query::<Pg, _>(&query).to_string();

        assert!(rendered.contains("\"reviews\".\"title\" ILIKE"));
        assert!(rendered.contains("\"reviews\".\"status\" ILIKE"));
        assert!(rendered.contains("reviews.updated_at::text ILIKE"));
    }

    #[test]
    fn listings_break_date_ties_by_id() {
        let invoices_query = invoices::table
            .inner_join(customers::table)
            .filter(invoice_search("%%".to_string()))
            .select(invoices::id)
            .order(invoice_listing_order());
        let rendered = debug_query::<Pg, _>(&invoices_query).to_string();
        assert!(rendered.contains(
            "ORDER BY \"invoices\".\"date\" DESC, \"invoices\".\"id\" DESC"
        ));

        let reviews_query = reviews::table
            .inner_join(customers::table)
            .filter(review_search("%%".to_string()))
            .select(reviews::id)
            .order(review_listing_order());
        let rendered = debug_query::<Pg, _>(&reviews_query).to_string();
        assert!(rendered.contains(
            "ORDER BY \"reviews\".\"updated_at\" DESC, \"reviews\".\"id\" DESC"
        ));
    }
}

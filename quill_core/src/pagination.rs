use sea_orm::{ConnectionTrait, DbErr, EntityTrait, FromQueryResult, PaginatorTrait, Select};

/// A bounded window over a listing query.
///
/// `number` is 1-based. An empty listing still yields one (empty) page so
/// templates never see page 0 of 0.
#[derive(Debug, Clone)]
pub struct Page<M> {
    pub items: Vec<M>,
    pub number: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<M> Page<M> {
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

/// Runs `select` through SeaORM's paginator and returns the requested page.
///
/// A missing or zero page parameter resolves to page 1; a page number past
/// the end falls back to the last valid page instead of erroring.
pub async fn paginate<C, E>(
    select: Select<E>,
    db: &C,
    per_page: u64,
    requested: Option<u64>,
) -> Result<Page<E::Model>, DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
    E::Model: FromQueryResult + Sized + Send + Sync,
{
    let per_page = per_page.max(1);
    let paginator = select.paginate(db, per_page);

    let counts = paginator.num_items_and_pages().await?;
    let total_items = counts.number_of_items;
    let total_pages = counts.number_of_pages;

    if total_pages == 0 {
        return Ok(Page {
            items: Vec::new(),
            number: 1,
            per_page,
            total_items: 0,
            total_pages: 1,
        });
    }

    let number = requested.unwrap_or(1).clamp(1, total_pages);

    // SeaORM pages are 0-based
    let items = paginator.fetch_page(number - 1).await?;

    Ok(Page {
        items,
        number,
        per_page,
        total_items,
        total_pages,
    })
}

// src/common/pagination.rs

use serde::Serialize;
use utoipa::ToSchema;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

// Resposta paginada padrão: { items, page, pageSize, total }
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
}

// Normaliza page/pageSize vindos da query string.
// page mínimo 1; pageSize padrão 20, teto 100.
pub fn clamp(page: Option<i64>, page_size: Option<i64>) -> (i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let page_size = page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    (page, page_size)
}

pub fn offset(page: i64, page_size: i64) -> i64 {
    (page - 1) * page_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usa_padroes_quando_ausente() {
        assert_eq!(clamp(None, None), (1, 20));
    }

    #[test]
    fn limita_page_size_em_100() {
        assert_eq!(clamp(Some(3), Some(500)), (3, 100));
    }

    #[test]
    fn corrige_valores_invalidos() {
        assert_eq!(clamp(Some(0), Some(0)), (1, 1));
        assert_eq!(clamp(Some(-2), Some(-5)), (1, 1));
    }

    #[test]
    fn calcula_offset() {
        assert_eq!(offset(1, 20), 0);
        assert_eq!(offset(3, 20), 40);
    }
}

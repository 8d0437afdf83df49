//! Dense table grid reconstruction
//!
//! Rebuilds a rectangular grid of cell text from a table's sparse cell list
//! and its declared row/column counts. The declared counts are authoritative:
//! cells outside them are discarded, and duplicate coordinates resolve to the
//! last entry in list order.

use super::models::TableModel;

/// Build the dense `n_rows x n_cols` grid for a table.
///
/// Returns `None` when the declared geometry is invalid (either count not
/// positive), distinguishable from a legitimately empty grid, which cannot
/// occur once both counts are positive. Deterministic and pure.
pub fn build_grid(table: &TableModel) -> Option<Vec<Vec<String>>> {
    if table.n_rows <= 0 || table.n_cols <= 0 {
        return None;
    }

    let n_rows = table.n_rows as usize;
    let n_cols = table.n_cols as usize;
    let mut grid = vec![vec![String::new(); n_cols]; n_rows];

    for cell in &table.cells {
        if cell.row < 0 || cell.col < 0 {
            continue;
        }
        let (row, col) = (cell.row as usize, cell.col as usize);
        if row < n_rows && col < n_cols {
            grid[row][col] = cell.text.clone();
        }
    }

    Some(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::models::TableCell;

    fn table(n_rows: i64, n_cols: i64, cells: Vec<(i64, i64, &str)>) -> TableModel {
        TableModel {
            page_number: 1,
            n_rows,
            n_cols,
            cells: cells
                .into_iter()
                .map(|(row, col, text)| TableCell {
                    row,
                    col,
                    text: text.to_string(),
                })
                .collect(),
            score: None,
            method: "heuristic".to_string(),
            bbox: None,
            source_block_index: None,
        }
    }

    #[test]
    fn test_sparse_cells_fill_dense_grid() {
        let grid = build_grid(&table(2, 2, vec![(0, 0, "a"), (1, 1, "b")])).unwrap();
        assert_eq!(
            grid,
            vec![
                vec!["a".to_string(), String::new()],
                vec![String::new(), "b".to_string()]
            ]
        );
    }

    #[test]
    fn test_zero_rows_is_invalid() {
        assert!(build_grid(&table(0, 3, vec![(0, 0, "a")])).is_none());
        assert!(build_grid(&table(3, 0, vec![])).is_none());
        assert!(build_grid(&table(-1, 2, vec![])).is_none());
    }

    #[test]
    fn test_out_of_bounds_cells_discarded() {
        let grid = build_grid(&table(1, 1, vec![(0, 0, "keep"), (0, 5, "x"), (-1, 0, "y")])).unwrap();
        assert_eq!(grid, vec![vec!["keep".to_string()]]);
    }

    #[test]
    fn test_last_write_wins_for_duplicates() {
        let grid = build_grid(&table(1, 1, vec![(0, 0, "first"), (0, 0, "second")])).unwrap();
        assert_eq!(grid[0][0], "second");
    }

    #[test]
    fn test_build_grid_is_idempotent() {
        let t = table(2, 3, vec![(0, 1, "a"), (1, 2, "b"), (0, 1, "c")]);
        assert_eq!(build_grid(&t), build_grid(&t));
    }
}

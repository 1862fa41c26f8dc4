//! This module contains a general-purpose exact cover engine built on
//! Knuth's dancing links technique (DLX).
//!
//! An exact cover problem is given by a sparse 0/1 matrix: every column is a
//! constraint that must be satisfied exactly once and every row is a
//! candidate satisfying some of the constraints. A solution is a set of rows
//! such that every column contains a 1 in exactly one selected row. The
//! [ConstraintMatrix] stores this matrix as circular doubly-linked lists:
//! every node belongs to the vertical ring of its column and to the
//! horizontal ring of its row, and all live columns form a horizontal header
//! ring anchored by a root sentinel.
//!
//! The dancing links trick is that splicing a node out of a ring leaves the
//! node's own link fields untouched, so splicing it back in later is a
//! constant-time operation that needs no bookkeeping beyond reversing the
//! removal order. [ConstraintMatrix::cover] and [ConstraintMatrix::uncover]
//! build on this to remove a satisfied constraint together with all
//! conflicting candidates and to restore them exactly, which is what makes
//! the backtracking in [ConstraintMatrix::search] cheap.
//!
//! All links are indices into one contiguous node arena rather than
//! references, which keeps the cyclic structure compatible with Rust's
//! ownership rules while preserving constant-time link mutation.
//!
//! # Example
//!
//! The following solves the 7-column instance from Knuth's paper.
//!
//! ```
//! use sudoku_dlx::dlx::ConstraintMatrix;
//!
//! // Columns are 1-based; 0 is the root sentinel.
//! let mut matrix = ConstraintMatrix::new(7);
//! matrix.add_row(&[3, 5]);
//! matrix.add_row(&[1, 4, 7]);
//! matrix.add_row(&[2, 3, 6]);
//! matrix.add_row(&[1, 4, 6]);
//! matrix.add_row(&[2, 7]);
//! matrix.add_row(&[4, 5, 7]);
//!
//! let solution = matrix.search().unwrap();
//! let mut rows: Vec<usize> =
//!     solution.iter().map(|&node| matrix.row_of(node)).collect();
//! rows.sort();
//!
//! assert_eq!(vec![0, 3, 4], rows);
//! ```

/// Arena index of the root sentinel that anchors the header ring. The root
/// is a member of the ring but represents no constraint.
const ROOT: usize = 0;

/// Marker stored in the row field of the root and the column head nodes,
/// which belong to no candidate row.
const NO_ROW: usize = usize::MAX;

/// A member of one constraint column and one candidate row. Column heads and
/// the root sentinel reuse the same record; their horizontal ring is the
/// header ring instead of a candidate row.
#[derive(Clone, Debug, Eq, PartialEq)]
struct Node {
    left: usize,
    right: usize,
    up: usize,
    down: usize,
    column: usize,
    row: usize
}

impl Node {
    /// A node whose four links point to itself (degenerate singleton ring).
    fn unlinked(index: usize, column: usize, row: usize) -> Node {
        Node {
            left: index,
            right: index,
            up: index,
            down: index,
            column,
            row
        }
    }
}

/// A sparse 0/1 matrix in dancing links representation together with the
/// exact cover search over it.
///
/// Constraint columns are identified by the indices `1..=columns` in
/// creation order; candidate rows by consecutive ids starting at 0 in the
/// order of the [ConstraintMatrix::add_row] calls. Nodes are never destroyed
/// while the matrix lives, only hidden and restored, so a matrix can be
/// covered, searched, and reused for as long as every removal is reversed in
/// last-removed-first order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConstraintMatrix {
    nodes: Vec<Node>,
    sizes: Vec<usize>,
    columns: usize,
    rows: usize
}

impl ConstraintMatrix {

    /// Creates a new matrix with the given number of constraint columns and
    /// no candidate rows. The columns are linked into the header ring in
    /// index order.
    pub fn new(columns: usize) -> ConstraintMatrix {
        let mut matrix = ConstraintMatrix {
            nodes: Vec::with_capacity(columns + 1),
            sizes: vec![0; columns + 1],
            columns,
            rows: 0
        };
        matrix.nodes.push(Node::unlinked(ROOT, ROOT, NO_ROW));

        for _ in 0..columns {
            matrix.append_column();
        }

        matrix
    }

    /// Appends a new column head just before the root, preserving insertion
    /// order in the header ring.
    fn append_column(&mut self) {
        let head = self.nodes.len();
        let last = self.nodes[ROOT].left;
        self.nodes.push(Node::unlinked(head, head, NO_ROW));
        self.nodes[head].left = last;
        self.nodes[head].right = ROOT;
        self.nodes[last].right = head;
        self.nodes[ROOT].left = head;
    }

    /// Gets the number of constraint columns, covered or not.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Adds a candidate row that satisfies the given constraint columns and
    /// returns its row id. One node is created per entry, appended at the
    /// tail of that column's vertical ring, and all nodes of the row are
    /// linked into one horizontal ring.
    ///
    /// The entries must be distinct column indices in `1..=columns`. Rows
    /// must only be added while the matrix is fully uncovered.
    pub fn add_row(&mut self, entries: &[usize]) -> usize {
        debug_assert!(!entries.is_empty());

        let row = self.rows;
        self.rows += 1;
        let first = self.nodes.len();

        for &column in entries {
            debug_assert!(column >= 1 && column <= self.columns);

            let index = self.nodes.len();
            let above = self.nodes[column].up;
            self.nodes.push(Node {
                left: index,
                right: index,
                up: above,
                down: column,
                column,
                row
            });
            self.nodes[above].down = index;
            self.nodes[column].up = index;
            self.sizes[column] += 1;
        }

        let count = entries.len();

        for offset in 0..count {
            let index = first + offset;
            self.nodes[index].right = first + (offset + 1) % count;
            self.nodes[index].left = first + (offset + count - 1) % count;
        }

        row
    }

    /// Gets the number of nodes currently active in the given column's
    /// vertical ring, excluding the head.
    pub fn column_size(&self, column: usize) -> usize {
        self.sizes[column]
    }

    /// Gets the currently uncovered constraint columns in header ring order.
    pub fn live_columns(&self) -> Vec<usize> {
        let mut columns = Vec::new();
        let mut column = self.nodes[ROOT].right;

        while column != ROOT {
            columns.push(column);
            column = self.nodes[column].right;
        }

        columns
    }

    /// Gets the index of the node below the given one in its column's
    /// vertical ring. Starting from a column head this walks the column's
    /// active nodes top to bottom and wraps back to the head.
    pub fn down(&self, index: usize) -> usize {
        self.nodes[index].down
    }

    /// Gets the constraint column owning the given node.
    pub fn column_of(&self, index: usize) -> usize {
        self.nodes[index].column
    }

    /// Gets the id of the candidate row the given node belongs to.
    pub fn row_of(&self, node: usize) -> usize {
        debug_assert!(self.nodes[node].row != NO_ROW);

        self.nodes[node].row
    }

    /// Gets the constraint columns satisfied by the candidate row the given
    /// node belongs to, in row ring order starting at that node.
    pub fn row_columns(&self, node: usize) -> Vec<usize> {
        let mut columns = vec![self.nodes[node].column];
        let mut current = self.nodes[node].right;

        while current != node {
            columns.push(self.nodes[current].column);
            current = self.nodes[current].right;
        }

        columns
    }

    /// Indicates whether the candidate row the given node belongs to
    /// satisfies the given constraint column.
    pub fn row_contains(&self, node: usize, column: usize) -> bool {
        if self.nodes[node].column == column {
            return true;
        }

        let mut current = self.nodes[node].right;

        while current != node {
            if self.nodes[current].column == column {
                return true;
            }

            current = self.nodes[current].right;
        }

        false
    }

    /// Splices the column head out of the header ring. The head's own link
    /// fields stay untouched, which is what allows [ConstraintMatrix::unhide]
    /// to restore it without recomputing anything.
    fn hide(&mut self, column: usize) {
        let left = self.nodes[column].left;
        let right = self.nodes[column].right;
        self.nodes[left].right = right;
        self.nodes[right].left = left;
    }

    /// Splices the column head back into the header ring, using the head's
    /// still-valid link fields.
    fn unhide(&mut self, column: usize) {
        let left = self.nodes[column].left;
        let right = self.nodes[column].right;
        self.nodes[right].left = column;
        self.nodes[left].right = column;
    }

    /// Covers the given constraint column: removes it from the header ring
    /// and unlinks every other node of every candidate row in the column
    /// from its own column's vertical ring, decrementing that column's size.
    ///
    /// The column's own vertical ring is left intact, so the removed
    /// candidates can still be enumerated by walking down from the head.
    /// Covering the same column twice without an intervening
    /// [ConstraintMatrix::uncover] corrupts the matrix.
    pub fn cover(&mut self, column: usize) {
        self.hide(column);
        let mut node = self.nodes[column].down;

        while node != column {
            let mut other = self.nodes[node].right;

            while other != node {
                let up = self.nodes[other].up;
                let down = self.nodes[other].down;
                self.nodes[up].down = down;
                self.nodes[down].up = up;
                self.sizes[self.nodes[other].column] -= 1;
                other = self.nodes[other].right;
            }

            node = self.nodes[node].down;
        }
    }

    /// Reverses [ConstraintMatrix::cover] for the given column. The
    /// traversal runs in the exact opposite order (rows bottom to top, row
    /// nodes right to left), relinking each node with the link fields frozen
    /// at removal time, so the matrix returns to a link-for-link and
    /// size-for-size identical state.
    ///
    /// Cover/uncover pairs may nest arbitrarily as long as they are undone
    /// in last-covered-first order.
    pub fn uncover(&mut self, column: usize) {
        let mut node = self.nodes[column].up;

        while node != column {
            let mut other = self.nodes[node].left;

            while other != node {
                self.sizes[self.nodes[other].column] += 1;
                let up = self.nodes[other].up;
                let down = self.nodes[other].down;
                self.nodes[up].down = other;
                self.nodes[down].up = other;
                other = self.nodes[other].left;
            }

            node = self.nodes[node].up;
        }

        self.unhide(column);
    }

    /// Commits to the candidate row the given node belongs to by covering
    /// the owning column of every *other* node in its row ring, left to
    /// right. The node's own column is expected to be covered already.
    pub fn select_row(&mut self, node: usize) {
        let mut other = self.nodes[node].right;

        while other != node {
            let column = self.nodes[other].column;
            self.cover(column);
            other = self.nodes[other].right;
        }
    }

    /// Reverses [ConstraintMatrix::select_row], uncovering the other
    /// columns of the row in right-to-left order.
    pub fn unselect_row(&mut self, node: usize) {
        let mut other = self.nodes[node].left;

        while other != node {
            let column = self.nodes[other].column;
            self.uncover(column);
            other = self.nodes[other].left;
        }
    }

    /// Chooses the live column with the fewest active nodes, ties broken by
    /// header ring order (the first one encountered wins). Returns `None` if
    /// no column remains uncovered.
    fn min_size_column(&self) -> Option<usize> {
        let mut column = self.nodes[ROOT].right;

        if column == ROOT {
            return None;
        }

        let mut min_column = column;

        while column != ROOT {
            if self.sizes[column] < self.sizes[min_column] {
                min_column = column;
            }

            column = self.nodes[column].right;
        }

        Some(min_column)
    }

    /// Searches for one exact cover of the currently live columns using
    /// Knuth's Algorithm X with the minimum-size branching heuristic.
    ///
    /// On success the selected candidate rows are returned as node indices
    /// in selection order; [ConstraintMatrix::row_of] and
    /// [ConstraintMatrix::row_columns] decode them. Whether a cover is found
    /// or not, the matrix is restored to its pre-call state before this
    /// method returns, so the same matrix can serve further searches.
    ///
    /// An exhausted search returns `None`; running out of candidates is a
    /// regular outcome, not an error.
    pub fn search(&mut self) -> Option<Vec<usize>> {
        let mut selection = Vec::new();

        if self.search_rec(&mut selection) {
            // The recursion leaves all covers of the successful branch in
            // place; tear them down in last-applied-first order.
            for &node in selection.iter().rev() {
                self.unselect_row(node);
                self.uncover(self.nodes[node].column);
            }

            Some(selection)
        }
        else {
            None
        }
    }

    fn search_rec(&mut self, selection: &mut Vec<usize>) -> bool {
        let column = match self.min_size_column() {
            Some(column) => column,
            // Empty header ring: every constraint is satisfied.
            None => return true
        };

        self.cover(column);
        let mut node = self.nodes[column].down;

        while node != column {
            selection.push(node);
            self.select_row(node);

            if self.search_rec(selection) {
                return true;
            }

            self.unselect_row(node);
            selection.pop();
            node = self.nodes[node].down;
        }

        self.uncover(column);
        false
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    /// The 7-column, 6-row instance from Knuth's paper, whose unique
    /// solution is the rows 0, 3 and 4.
    fn knuth_matrix() -> ConstraintMatrix {
        let mut matrix = ConstraintMatrix::new(7);
        matrix.add_row(&[3, 5]);
        matrix.add_row(&[1, 4, 7]);
        matrix.add_row(&[2, 3, 6]);
        matrix.add_row(&[1, 4, 6]);
        matrix.add_row(&[2, 7]);
        matrix.add_row(&[4, 5, 7]);
        matrix
    }

    /// Asserts that every link of every node reachable from the root is
    /// symmetric, i.e. that the neighbors of a reachable node point back at
    /// it in both ring directions.
    fn assert_ring_symmetry(matrix: &ConstraintMatrix) {
        let mut column = matrix.nodes[ROOT].right;

        while column != ROOT {
            let head = &matrix.nodes[column];
            assert_eq!(column, matrix.nodes[head.left].right);
            assert_eq!(column, matrix.nodes[head.right].left);
            assert_eq!(column, matrix.nodes[head.up].down);
            assert_eq!(column, matrix.nodes[head.down].up);

            let mut node = head.down;

            while node != column {
                let mut current = node;

                loop {
                    let entry = &matrix.nodes[current];
                    assert_eq!(current, matrix.nodes[entry.left].right);
                    assert_eq!(current, matrix.nodes[entry.right].left);
                    assert_eq!(current, matrix.nodes[entry.up].down);
                    assert_eq!(current, matrix.nodes[entry.down].up);
                    current = entry.right;

                    if current == node {
                        break;
                    }
                }

                node = matrix.nodes[node].down;
            }

            column = head.right;
        }
    }

    /// Asserts that the stored size of every live column equals the number
    /// of nodes actually reachable by walking down its vertical ring.
    fn assert_size_consistency(matrix: &ConstraintMatrix) {
        for column in matrix.live_columns() {
            let mut count = 0;
            let mut node = matrix.nodes[column].down;

            while node != column {
                count += 1;
                node = matrix.nodes[node].down;
            }

            assert_eq!(matrix.sizes[column], count,
                "inconsistent size of column {}", column);
        }
    }

    fn total_live_size(matrix: &ConstraintMatrix) -> usize {
        matrix.live_columns().iter()
            .map(|&column| matrix.column_size(column))
            .sum()
    }

    #[test]
    fn fresh_matrix_is_consistent() {
        let matrix = knuth_matrix();

        assert_ring_symmetry(&matrix);
        assert_size_consistency(&matrix);
        assert_eq!(vec![1, 2, 3, 4, 5, 6, 7], matrix.live_columns());
        assert_eq!(2, matrix.column_size(1));
        assert_eq!(3, matrix.column_size(4));
        assert_eq!(3, matrix.column_size(7));
        assert_eq!(16, total_live_size(&matrix));
    }

    #[test]
    fn row_ring_visits_all_row_members() {
        let matrix = knuth_matrix();
        let node = matrix.down(4);

        assert_eq!(1, matrix.row_of(node));
        assert_eq!(vec![4, 7, 1], matrix.row_columns(node));
        assert!(matrix.row_contains(node, 1));
        assert!(matrix.row_contains(node, 4));
        assert!(matrix.row_contains(node, 7));
        assert!(!matrix.row_contains(node, 3));
    }

    #[test]
    fn cover_removes_column_from_header_ring() {
        let mut matrix = knuth_matrix();
        matrix.cover(3);

        assert_eq!(vec![1, 2, 4, 5, 6, 7], matrix.live_columns());
        assert_ring_symmetry(&matrix);
        assert_size_consistency(&matrix);
    }

    #[test]
    fn cover_uncover_restores_exact_state() {
        let mut matrix = knuth_matrix();
        let snapshot = matrix.clone();

        for column in 1..=7 {
            matrix.cover(column);
            matrix.uncover(column);

            assert_eq!(snapshot, matrix,
                "cover/uncover of column {} left residue", column);
        }
    }

    #[test]
    fn nested_cover_uncover_restores_exact_state() {
        let mut matrix = knuth_matrix();
        let snapshot = matrix.clone();

        matrix.cover(1);
        matrix.cover(5);
        matrix.cover(2);

        assert_ring_symmetry(&matrix);
        assert_size_consistency(&matrix);

        matrix.uncover(2);
        matrix.uncover(5);
        matrix.uncover(1);

        assert_eq!(snapshot, matrix);
    }

    #[test]
    fn select_unselect_restores_exact_state() {
        let mut matrix = knuth_matrix();
        let snapshot = matrix.clone();

        // Simulate one search step: cover a column, select a row in it.
        matrix.cover(1);
        let node = matrix.down(1);
        matrix.select_row(node);

        assert_ring_symmetry(&matrix);
        assert_size_consistency(&matrix);

        matrix.unselect_row(node);
        matrix.uncover(1);

        assert_eq!(snapshot, matrix);
    }

    #[test]
    fn covering_known_columns_yields_known_sizes() {
        let mut matrix = knuth_matrix();

        matrix.cover(1);

        assert_eq!(10, total_live_size(&matrix));
        assert_eq!(1, matrix.column_size(4));
        assert_eq!(1, matrix.column_size(6));
        assert_eq!(2, matrix.column_size(7));

        matrix.cover(4);

        assert_eq!(7, total_live_size(&matrix));

        matrix.cover(2);

        assert_eq!(2, total_live_size(&matrix));
        assert_eq!(0, matrix.column_size(6));
        assert_eq!(0, matrix.column_size(7));
        assert_size_consistency(&matrix);
    }

    #[test]
    fn full_cover_empties_header_ring() {
        let mut matrix = knuth_matrix();
        let snapshot = matrix.clone();
        let mut covered = Vec::new();

        while let Some(&column) = matrix.live_columns().first() {
            matrix.cover(column);
            covered.push(column);
        }

        assert!(matrix.live_columns().is_empty());
        assert_eq!(ROOT, matrix.nodes[ROOT].right);
        assert_eq!(ROOT, matrix.nodes[ROOT].left);

        for &column in covered.iter().rev() {
            matrix.uncover(column);
        }

        assert_eq!(snapshot, matrix);
    }

    #[test]
    fn min_size_column_breaks_ties_by_ring_order() {
        let matrix = knuth_matrix();

        // Columns 1, 2, 3, 5 and 6 all have the minimal size 2; the first
        // one in ring order must win.
        assert_eq!(Some(1), matrix.min_size_column());
    }

    #[test]
    fn search_finds_unique_solution() {
        let mut matrix = knuth_matrix();
        let snapshot = matrix.clone();
        let solution = matrix.search().expect("solvable instance rejected");

        let mut rows: Vec<usize> =
            solution.iter().map(|&node| matrix.row_of(node)).collect();
        rows.sort();

        assert_eq!(vec![0, 3, 4], rows);
        assert_eq!(snapshot, matrix, "search left residue");
    }

    #[test]
    fn search_covers_all_columns_exactly_once() {
        let mut matrix = knuth_matrix();
        let solution = matrix.search().unwrap();
        let mut covered: Vec<usize> = solution.iter()
            .flat_map(|&node| matrix.row_columns(node))
            .collect();
        covered.sort();

        assert_eq!(vec![1, 2, 3, 4, 5, 6, 7], covered);
    }

    #[test]
    fn search_without_candidates_fails() {
        let mut matrix = ConstraintMatrix::new(2);
        let snapshot = matrix.clone();

        assert_eq!(None, matrix.search());
        assert_eq!(snapshot, matrix);
    }

    #[test]
    fn search_on_unsatisfiable_matrix_fails() {
        // Column 3 has no candidate at all, so no cover exists even though
        // the other columns could be satisfied.
        let mut matrix = ConstraintMatrix::new(3);
        matrix.add_row(&[1]);
        matrix.add_row(&[2]);
        matrix.add_row(&[1, 2]);
        let snapshot = matrix.clone();

        assert_eq!(None, matrix.search());
        assert_eq!(snapshot, matrix);
    }

    #[test]
    fn search_without_columns_succeeds_trivially() {
        let mut matrix = ConstraintMatrix::new(0);

        assert_eq!(Some(Vec::new()), matrix.search());
    }
}

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::*;

/// Display position on the 5x5 grid, `0..BOARD_CELLS`, row major.
pub type CellIndex = u8;

pub const BOARD_SIDE: usize = 5;
pub const BOARD_CELLS: usize = BOARD_SIDE * BOARD_SIDE;
pub const CONTENT_CELLS: usize = BOARD_CELLS - 1;
pub const FREE_SPACE: CellIndex = 12;
pub const MAX_DATA_LEN: usize = 10_000;

/// Unbiased Fisher-Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Content slot shown at a non-free display position.
const fn slot_for(position: CellIndex) -> usize {
    if position < FREE_SPACE {
        position as usize
    } else {
        position as usize - 1
    }
}

/// Display order: `indices[slot]` is the content index shown in that slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    indices: Vec<CellIndex>,
}

impl Order {
    pub fn identity() -> Self {
        Self {
            indices: (0..CONTENT_CELLS as CellIndex).collect(),
        }
    }

    pub fn shuffled(seed: u64) -> Self {
        let mut order = Self::identity();
        let mut rng = SmallRng::seed_from_u64(seed);
        shuffle(&mut order.indices, &mut rng);
        order
    }

    /// Accepts only a true permutation of `0..CONTENT_CELLS`.
    pub fn from_indices(indices: &[i64]) -> core::result::Result<Self, BoardError> {
        let not_a_permutation = BoardError::NotAPermutation { len: CONTENT_CELLS };
        if indices.len() != CONTENT_CELLS {
            return Err(not_a_permutation);
        }

        let mut seen = [false; CONTENT_CELLS];
        let mut out = Vec::with_capacity(CONTENT_CELLS);
        for &index in indices {
            let slot = usize::try_from(index)
                .ok()
                .filter(|&slot| slot < CONTENT_CELLS)
                .ok_or(BoardError::InvalidIndex(index))?;
            if core::mem::replace(&mut seen[slot], true) {
                return Err(not_a_permutation);
            }
            out.push(slot as CellIndex);
        }
        Ok(Self { indices: out })
    }

    pub fn as_slice(&self) -> &[CellIndex] {
        &self.indices
    }

    /// Content index shown at `position`, `None` for the free space or off-board.
    pub fn content_index_at(&self, position: CellIndex) -> Option<usize> {
        if position == FREE_SPACE || usize::from(position) >= BOARD_CELLS {
            return None;
        }
        self.indices.get(slot_for(position)).map(|&i| usize::from(i))
    }

    pub fn to_param(&self) -> String {
        format_indices(&self.indices)
    }
}

/// Marked display positions. The free space is always a member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkedSet {
    cells: BTreeSet<CellIndex>,
}

impl Default for MarkedSet {
    fn default() -> Self {
        Self {
            cells: BTreeSet::from([FREE_SPACE]),
        }
    }
}

impl MarkedSet {
    pub fn from_indices(indices: &[i64]) -> core::result::Result<Self, BoardError> {
        let mut set = Self::default();
        for &index in indices {
            let position = CellIndex::try_from(index)
                .ok()
                .filter(|&p| usize::from(p) < BOARD_CELLS)
                .ok_or(BoardError::InvalidIndex(index))?;
            set.cells.insert(position);
        }
        Ok(set)
    }

    pub fn contains(&self, position: CellIndex) -> bool {
        self.cells.contains(&position)
    }

    /// Ascending positions.
    pub fn iter(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.cells.iter().copied()
    }

    /// Returns a copy with `position` flipped. The free space never changes.
    pub fn toggled(&self, position: CellIndex) -> Self {
        let mut next = self.clone();
        if position == FREE_SPACE {
            return next;
        }
        if usize::from(position) >= BOARD_CELLS {
            log::warn!("ignoring toggle of off-board cell {}", position);
            return next;
        }
        if !next.cells.remove(&position) {
            next.cells.insert(position);
        }
        next
    }

    pub fn to_param(&self) -> String {
        format_indices(&self.iter().collect::<Vec<_>>())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell<'a> {
    Free,
    Content {
        position: CellIndex,
        text: &'a str,
        marked: bool,
    },
}

impl Cell<'_> {
    pub const fn position(&self) -> CellIndex {
        match self {
            Cell::Free => FREE_SPACE,
            Cell::Content { position, .. } => *position,
        }
    }

    pub const fn is_marked(&self) -> bool {
        match self {
            Cell::Free => true,
            Cell::Content { marked, .. } => *marked,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardState {
    content: Vec<String>,
    order: Order,
    marked: MarkedSet,
}

impl BoardState {
    /// Starts a fresh board with a shuffled order and only the free space marked.
    pub fn new(content: Vec<String>, seed: u64) -> core::result::Result<Self, BoardError> {
        Self::from_parts(content, Order::shuffled(seed), MarkedSet::default())
    }

    pub fn from_parts(
        content: Vec<String>,
        order: Order,
        marked: MarkedSet,
    ) -> core::result::Result<Self, BoardError> {
        if content.len() != CONTENT_CELLS {
            return Err(BoardError::ContentLength {
                expected: CONTENT_CELLS,
                actual: content.len(),
            });
        }
        Ok(Self {
            content,
            order,
            marked,
        })
    }

    /// Rebuilds a board from raw parameters. `seed` is only used when `order` is absent.
    pub fn from_params(params: &UrlParams, seed: u64) -> core::result::Result<Self, LoadError> {
        validate(params)
            .into_result()
            .map_err(LoadError::Invalid)?;

        let data = params.data().ok_or(LoadError::Missing)?;
        let content = decode_lines(data)?;

        let order = match params.order() {
            Some(order) => Order::from_indices(&parse_indices(order))?,
            None => {
                log::info!("no order in url, shuffling with seed {}", seed);
                Order::shuffled(seed)
            }
        };
        let marked = match params.marked() {
            Some(marked) => MarkedSet::from_indices(&parse_indices(marked))?,
            None => MarkedSet::default(),
        };

        Ok(Self::from_parts(content, order, marked)?)
    }

    pub fn load<S: StateStore + ?Sized>(
        store: &S,
        seed: u64,
    ) -> core::result::Result<Self, LoadError> {
        Self::from_params(&store.read(), seed)
    }

    pub fn save<S: StateStore + ?Sized>(&self, store: &mut S) {
        store.write(&self.to_params());
    }

    pub fn to_params(&self) -> UrlParams {
        UrlParams::new(
            Some(encode_lines_or_empty(&self.content)),
            Some(self.order.to_param()),
            Some(self.marked.to_param()),
        )
    }

    pub fn content(&self) -> &[String] {
        &self.content
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn marked(&self) -> &MarkedSet {
        &self.marked
    }

    /// Flips the mark at `position`, returning whether anything changed.
    pub fn toggle(&mut self, position: CellIndex) -> bool {
        let next = self.marked.toggled(position);
        let changed = next != self.marked;
        self.marked = next;
        changed
    }

    pub fn cell_at(&self, position: CellIndex) -> Option<Cell<'_>> {
        if position == FREE_SPACE {
            return Some(Cell::Free);
        }
        let text = self.content.get(self.order.content_index_at(position)?)?;
        Some(Cell::Content {
            position,
            text,
            marked: self.marked.contains(position),
        })
    }

    /// All display cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell<'_>> + '_ {
        (0..BOARD_CELLS as CellIndex).filter_map(move |position| self.cell_at(position))
    }

    /// Whether any row, column or diagonal is fully marked.
    pub fn has_bingo(&self) -> bool {
        const N: usize = BOARD_SIDE;

        (0..N).any(|row| self.is_line_marked((0..N).map(|col| (row, col))))
            || (0..N).any(|col| self.is_line_marked((0..N).map(|row| (row, col))))
            || self.is_line_marked((0..N).map(|i| (i, i)))
            || self.is_line_marked((0..N).map(|i| (i, N - 1 - i)))
    }

    fn is_line_marked(&self, mut line: impl Iterator<Item = (usize, usize)>) -> bool {
        line.all(|(row, col)| self.marked.contains((row * BOARD_SIDE + col) as CellIndex))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn letters() -> Vec<String> {
        ('A'..='X').map(String::from).collect()
    }

    fn board() -> BoardState {
        BoardState::from_parts(letters(), Order::identity(), MarkedSet::default()).unwrap()
    }

    fn is_permutation(order: &Order) -> bool {
        let mut sorted = order.as_slice().to_vec();
        sorted.sort_unstable();
        sorted == (0..CONTENT_CELLS as CellIndex).collect::<Vec<_>>()
    }

    #[test]
    fn shuffled_orders_are_permutations() {
        for seed in 0..500 {
            let order = Order::shuffled(seed);
            assert_eq!(order.as_slice().len(), CONTENT_CELLS);
            assert!(is_permutation(&order), "seed {seed}: {order:?}");
        }
    }

    #[test]
    fn shuffle_is_seed_deterministic() {
        assert_eq!(Order::shuffled(7), Order::shuffled(7));
        assert_ne!(Order::shuffled(7), Order::shuffled(8));
    }

    #[test]
    fn shuffle_is_uniform_over_small_permutations() {
        const TRIALS: usize = 60_000;
        let perms: [[u8; 3]; 6] = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];
        let mut counts = [0usize; 6];
        let mut rng = SmallRng::seed_from_u64(0x5eed);

        for _ in 0..TRIALS {
            let mut items = [0u8, 1, 2];
            shuffle(&mut items, &mut rng);
            let i = perms.iter().position(|p| *p == items).unwrap();
            counts[i] += 1;
        }

        let expected = TRIALS / perms.len();
        for count in counts {
            assert!(count.abs_diff(expected) < expected / 20, "{counts:?}");
        }
    }

    #[test]
    fn shuffle_handles_tiny_slices() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut empty: [u8; 0] = [];
        shuffle(&mut empty, &mut rng);
        let mut one = [9u8];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, [9]);
    }

    #[test]
    fn order_rejects_duplicates_and_gaps() {
        assert_eq!(
            Order::from_indices(&[0; 24]),
            Err(BoardError::NotAPermutation { len: 24 })
        );
        assert_eq!(
            Order::from_indices(&[0, 1, 2]),
            Err(BoardError::NotAPermutation { len: 24 })
        );
        let mut indices: Vec<i64> = (0..24).collect();
        indices[5] = 24;
        assert_eq!(
            Order::from_indices(&indices),
            Err(BoardError::InvalidIndex(24))
        );
    }

    #[test]
    fn order_maps_around_the_free_space() {
        let order = Order::identity();
        assert_eq!(order.content_index_at(0), Some(0));
        assert_eq!(order.content_index_at(11), Some(11));
        assert_eq!(order.content_index_at(FREE_SPACE), None);
        assert_eq!(order.content_index_at(13), Some(12));
        assert_eq!(order.content_index_at(24), Some(23));
        assert_eq!(order.content_index_at(25), None);
    }

    #[test]
    fn free_space_toggle_is_a_no_op() {
        let marked = MarkedSet::default().toggled(3);
        assert_eq!(marked.toggled(FREE_SPACE), marked);
        assert!(marked.toggled(FREE_SPACE).contains(FREE_SPACE));
    }

    #[test]
    fn toggle_adds_then_removes_and_stays_sorted() {
        let marked = MarkedSet::default().toggled(20).toggled(0).toggled(7);
        assert_eq!(marked.iter().collect::<Vec<_>>(), [0, 7, 12, 20]);
        assert_eq!(marked.to_param(), "0,7,12,20");

        let marked = marked.toggled(7);
        assert_eq!(marked.to_param(), "0,12,20");
    }

    #[test]
    fn toggle_does_not_touch_the_input() {
        let marked = MarkedSet::default();
        let _ = marked.toggled(4);
        assert_eq!(marked, MarkedSet::default());
    }

    #[test]
    fn off_board_toggle_is_ignored() {
        assert_eq!(MarkedSet::default().toggled(25), MarkedSet::default());
    }

    #[test]
    fn loaded_marked_set_always_has_free_space() {
        let marked = MarkedSet::from_indices(&[5, 1]).unwrap();
        assert_eq!(marked.to_param(), "1,5,12");
        assert_eq!(
            MarkedSet::from_indices(&[25]),
            Err(BoardError::InvalidIndex(25))
        );
    }

    #[test]
    fn cells_cover_the_grid_with_free_center() {
        let board = board();
        let cells: Vec<_> = board.cells().collect();

        assert_eq!(cells.len(), BOARD_CELLS);
        assert_eq!(cells[12], Cell::Free);
        assert_eq!(
            cells[13],
            Cell::Content {
                position: 13,
                text: "M",
                marked: false
            }
        );
        assert!(
            cells
                .iter()
                .enumerate()
                .all(|(i, cell)| usize::from(cell.position()) == i)
        );
        assert_eq!(cells.iter().filter(|cell| cell.is_marked()).count(), 1);
    }

    #[test]
    fn board_toggle_reports_changes() {
        let mut board = board();
        assert!(board.toggle(0));
        assert!(!board.toggle(FREE_SPACE));
        assert_eq!(
            board.cell_at(0),
            Some(Cell::Content {
                position: 0,
                text: "A",
                marked: true
            })
        );
    }

    #[test]
    fn bingo_through_the_free_space() {
        let mut board = board();
        for position in [10, 11, 13] {
            board.toggle(position);
        }
        assert!(!board.has_bingo());
        board.toggle(14);
        assert!(board.has_bingo());
    }

    #[test]
    fn bingo_on_column_and_anti_diagonal() {
        let mut column = board();
        for position in [1, 6, 11, 16, 21] {
            column.toggle(position);
        }
        assert!(column.has_bingo());

        let mut diagonal = board();
        for position in [4, 8, 16, 20] {
            diagonal.toggle(position);
        }
        assert!(diagonal.has_bingo());
    }

    #[test]
    fn new_board_requires_full_content() {
        assert_eq!(
            BoardState::new(letters()[..3].to_vec(), 1),
            Err(BoardError::ContentLength {
                expected: 24,
                actual: 3
            })
        );
    }

    #[test]
    fn params_round_trip_through_a_store() {
        let mut board = BoardState::new(letters(), 42).unwrap();
        board.toggle(3);
        board.toggle(24);

        let mut store = MemoryStore::default();
        board.save(&mut store);

        let params = store.read();
        assert_eq!(params.marked(), Some("3,12,24"));
        assert_eq!(BoardState::load(&store, 0).unwrap(), board);
    }

    #[test]
    fn missing_data_is_distinguished_from_corrupt_data() {
        let missing = BoardState::from_params(&UrlParams::default(), 0);
        assert!(matches!(missing, Err(LoadError::Missing)));

        let corrupt = UrlParams::new(Some("@@@".into()), None, None);
        assert!(matches!(
            BoardState::from_params(&corrupt, 0),
            Err(LoadError::Corrupt(CodecError::Base64(_)))
        ));
    }

    #[test]
    fn invalid_params_are_rejected_before_decoding() {
        let params = UrlParams::new(Some("@@@".into()), Some("0,1,2".into()), None);
        match BoardState::from_params(&params, 0) {
            Err(LoadError::Invalid(errors)) => assert_eq!(
                errors,
                [ValidationError::OrderCount {
                    expected: 24,
                    actual: 3
                }]
            ),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn duplicate_order_is_rejected_on_load() {
        let params = UrlParams::new(
            Some(encode_lines(&letters()).unwrap()),
            Some(format_indices(&[0u8; 24])),
            None,
        );
        assert!(matches!(
            BoardState::from_params(&params, 0),
            Err(LoadError::Board(BoardError::NotAPermutation { .. }))
        ));
    }

    #[test]
    fn absent_order_and_marked_get_defaults() {
        let params = UrlParams::new(Some(encode_lines(&letters()).unwrap()), None, None);
        let board = BoardState::from_params(&params, 9).unwrap();

        assert_eq!(board.order(), &Order::shuffled(9));
        assert_eq!(board.marked(), &MarkedSet::default());
    }

    #[test]
    fn wrong_content_length_is_a_board_error() {
        let params = UrlParams::new(Some(encode_lines(&["only"]).unwrap()), None, None);
        assert!(matches!(
            BoardState::from_params(&params, 0),
            Err(LoadError::Board(BoardError::ContentLength { actual: 1, .. }))
        ));
    }

    proptest! {
        #[test]
        fn toggling_twice_restores_the_set(
            start in proptest::collection::vec(0i64..25, 0..25),
            position in 0u8..25,
        ) {
            prop_assume!(position != FREE_SPACE);
            let marked = MarkedSet::from_indices(&start).unwrap();
            prop_assert_eq!(marked.toggled(position).toggled(position), marked);
        }

        #[test]
        fn free_space_toggle_never_changes_anything(
            start in proptest::collection::vec(0i64..25, 0..25),
        ) {
            let marked = MarkedSet::from_indices(&start).unwrap();
            prop_assert_eq!(marked.toggled(FREE_SPACE), marked);
        }
    }
}

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::Direction;

/***************************************/
/*             Public API              */
/***************************************/
/// Membership bits for the floors of one car, with directional queries. The
/// floor count is small, so a plain boolean array is adequate.
pub struct FloorSet {
    floors: Vec<bool>,
}

impl FloorSet {
    pub fn new(n_floors: u8) -> FloorSet {
        FloorSet {
            floors: vec![false; n_floors as usize],
        }
    }

    /// Marks `floor` as a member. Returns the previous membership bit.
    pub fn set(&mut self, floor: u8) -> bool {
        let index = self.index(floor);
        let prev = self.floors[index];
        self.floors[index] = true;
        prev
    }

    /// Removes `floor`. Returns the previous membership bit.
    pub fn clear(&mut self, floor: u8) -> bool {
        let index = self.index(floor);
        let prev = self.floors[index];
        self.floors[index] = false;
        prev
    }

    pub fn contains(&self, floor: u8) -> bool {
        self.floors[self.index(floor)]
    }

    pub fn is_empty(&self) -> bool {
        !self.floors.iter().any(|&member| member)
    }

    /// The closest member strictly beyond `from` in `dir`.
    pub fn nearest(&self, from: u8, dir: Direction) -> Option<u8> {
        self.index(from);
        let step = dir.offset();
        let mut floor = from as i16 + step;
        while floor >= 0 && (floor as usize) < self.floors.len() {
            if self.floors[floor as usize] {
                return Some(floor as u8);
            }
            floor += step;
        }
        None
    }

    /// The member farthest out in `dir`, provided it lies at or beyond `from`.
    pub fn furthest(&self, from: u8, dir: Direction) -> Option<u8> {
        self.index(from);
        match dir {
            Direction::Up => self.highest().filter(|&floor| floor >= from),
            Direction::Down => self.lowest().filter(|&floor| floor <= from),
            Direction::Idle => panic!("furthest requires UP or DOWN"),
        }
    }

    pub fn lowest(&self) -> Option<u8> {
        self.floors.iter().position(|&member| member).map(|i| i as u8)
    }

    pub fn highest(&self) -> Option<u8> {
        self.floors.iter().rposition(|&member| member).map(|i| i as u8)
    }

    /// The closest floor strictly beyond `from` in `dir` that is a member of
    /// any of `sets`. Lets callers treat several sets as one priority tier.
    pub fn nearest_across(from: u8, dir: Direction, sets: &[&FloorSet]) -> Option<u8> {
        let n_floors = sets
            .first()
            .map(|set| set.floors.len())
            .expect("nearest_across requires at least one set");
        assert!(
            sets.iter().all(|set| set.floors.len() == n_floors),
            "floor sets differ in size"
        );
        assert!((from as usize) < n_floors, "floor {} out of range", from);

        let step = dir.offset();
        let mut floor = from as i16 + step;
        while floor >= 0 && (floor as usize) < n_floors {
            if sets.iter().any(|set| set.floors[floor as usize]) {
                return Some(floor as u8);
            }
            floor += step;
        }
        None
    }

    fn index(&self, floor: u8) -> usize {
        assert!(
            (floor as usize) < self.floors.len(),
            "floor {} out of range",
            floor
        );
        floor as usize
    }
}

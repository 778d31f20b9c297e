use seatline_core::{CoreError, CoreResult};
use seatline_shared::Passenger;

use crate::RouteTable;

/// Address of a single seat. `section` is a position in the route table's
/// section list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeatRef {
    pub route: usize,
    pub section: usize,
    pub seat: u32,
}

impl SeatRef {
    pub fn new(route: usize, section: usize, seat: u32) -> Self {
        Self { route, section, seat }
    }
}

/// Who sits where: `[route][section][seat]`, each slot empty or holding one
/// passenger.
#[derive(Debug, Clone)]
pub struct SeatInventory {
    slots: Vec<Vec<Vec<Option<Passenger>>>>,
    seat_count: u32,
}

impl SeatInventory {
    /// Builds an empty inventory shaped after the route table.
    pub fn new(table: &RouteTable) -> Self {
        let seat_count = table.seat_count();
        let section = vec![None; seat_count as usize];
        let route = vec![section; table.sections().len()];

        Self {
            slots: vec![route; table.routes().len()],
            seat_count,
        }
    }

    pub fn seat_count(&self) -> u32 {
        self.seat_count
    }

    fn slot(&self, at: SeatRef) -> Option<&Option<Passenger>> {
        self.slots.get(at.route)?.get(at.section)?.get(at.seat as usize)
    }

    fn slot_mut(&mut self, at: SeatRef) -> CoreResult<&mut Option<Passenger>> {
        self.slots
            .get_mut(at.route)
            .and_then(|sections| sections.get_mut(at.section))
            .and_then(|seats| seats.get_mut(at.seat as usize))
            .ok_or_else(|| CoreError::Internal(format!("seat address out of bounds: {:?}", at)))
    }

    /// The passenger holding `at`, ignoring placeholder records.
    pub fn occupant(&self, at: SeatRef) -> Option<&Passenger> {
        self.slot(at)?.as_ref().filter(|p| !p.is_placeholder())
    }

    pub fn is_vacant(&self, at: SeatRef) -> bool {
        self.occupant(at).is_none()
    }

    /// Places `passenger` in a vacant seat.
    pub fn assign(&mut self, at: SeatRef, passenger: Passenger) -> CoreResult<()> {
        if !self.is_vacant(at) {
            return Err(CoreError::SeatOccupied);
        }
        *self.slot_mut(at)? = Some(passenger);
        Ok(())
    }

    /// Clears a seat, returning whoever held it.
    pub fn vacate(&mut self, at: SeatRef) -> CoreResult<Option<Passenger>> {
        Ok(self.slot_mut(at)?.take())
    }

    /// Occupied seats of one section, ascending by seat number.
    pub fn occupants(&self, route: usize, section: usize) -> Vec<(u32, &Passenger)> {
        let Some(seats) = self.slots.get(route).and_then(|s| s.get(section)) else {
            return Vec::new();
        };
        seats
            .iter()
            .enumerate()
            .filter_map(|(number, slot)| {
                slot.as_ref()
                    .filter(|p| !p.is_placeholder())
                    .map(|p| (number as u32, p))
            })
            .collect()
    }

    pub fn occupied_count(&self, route: usize) -> usize {
        self.slots.get(route).map_or(0, |sections| {
            (0..sections.len())
                .map(|section| self.occupants(route, section).len())
                .sum()
        })
    }

    /// Round-robin scan for a vacant seat on `route`.
    ///
    /// Sections are visited starting at `section_offset`, seats within each
    /// section starting at `seat_offset`, both wrapping around. The first
    /// vacant seat wins. Offsets larger than the dimensions are reduced
    /// modulo their size.
    pub fn find_vacant(&self, route: usize, section_offset: usize, seat_offset: u32) -> Option<SeatRef> {
        let sections = self.slots.get(route)?;
        let section_count = sections.len();
        let seat_count = self.seat_count as usize;
        if section_count == 0 || seat_count == 0 {
            return None;
        }

        for i in 0..section_count {
            let section = (i + section_offset) % section_count;
            for j in 0..seat_count {
                let seat = ((j + seat_offset as usize) % seat_count) as u32;
                let at = SeatRef::new(route, section, seat);
                if self.is_vacant(at) {
                    return Some(at);
                }
            }
        }
        None
    }
}

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seatline_catalog::{RouteTable, SeatInventory, SeatRef};
use seatline_core::{authorize, CallContext, Capability, Claims, CoreError, CoreResult, Target};
use seatline_shared::{Masked, Route};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::index::{Reservation, ReservationIndex};
use crate::models::{PurchaseRequest, Receipt, Removal, SeatAssignment, Ticket};
use crate::validation::validate_passenger;

const READERS: &[Capability] = &[Capability::Admin, Capability::Read];
const WRITERS: &[Capability] = &[Capability::Admin, Capability::Write];

/// Everything a mutation must change in one step.
struct EngineState {
    inventory: SeatInventory,
    index: ReservationIndex,
    rng: StdRng,
}

/// Owns the seat inventory and the reservation index.
///
/// One lock guards both: mutations hold it exclusively for the whole
/// check-search-write sequence, queries share it.
pub struct AllocationEngine {
    table: RouteTable,
    state: RwLock<EngineState>,
}

impl AllocationEngine {
    pub fn new(table: RouteTable) -> Self {
        Self::with_rng(table, StdRng::from_entropy())
    }

    /// Uses `rng` for the seat search offsets; seed it for reproducible
    /// assignments.
    pub fn with_rng(table: RouteTable, rng: StdRng) -> Self {
        let inventory = SeatInventory::new(&table);
        Self {
            table,
            state: RwLock::new(EngineState {
                inventory,
                index: ReservationIndex::new(),
                rng,
            }),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// The public fare table.
    pub fn list_routes(&self) -> &[Route] {
        self.table.routes()
    }

    pub async fn purchase(&self, ctx: &CallContext, claims: &Claims, request: PurchaseRequest) -> CoreResult<Ticket> {
        authorize(claims, WRITERS, Target::Identity(&request.passenger.email))?;
        ctx.check()?;
        validate_passenger(&request.passenger)?;

        let mut state = self.state.write().await;
        ctx.check()?;

        if state.index.contains(&request.passenger.email) {
            return Err(CoreError::AlreadyReserved);
        }
        let route_index = self
            .table
            .resolve(&request.origin, &request.destination, request.offered_price)?;

        let section_offset = state.rng.gen_range(0..self.table.sections().len());
        let seat_offset = state.rng.gen_range(0..self.table.seat_count());
        let at = state
            .inventory
            .find_vacant(route_index, section_offset, seat_offset)
            .ok_or(CoreError::NoSeatsAvailable)?;
        let section = self.section_name(at)?;

        let email = request.passenger.email.clone();
        state.inventory.assign(at, request.passenger)?;
        let reservation = Reservation::new(at);
        let ticket_id = reservation.ticket_id;
        state.index.insert(email.clone(), reservation);
        drop(state);

        let ticket = Ticket {
            ticket_id,
            route_index,
            section,
            seat: at.seat,
        };
        info!(
            email = %Masked(&email),
            route = route_index,
            section = %ticket.section,
            seat = ticket.seat,
            "Ticket purchased"
        );
        Ok(ticket)
    }

    pub async fn remove(&self, ctx: &CallContext, claims: &Claims, email: &str) -> CoreResult<Removal> {
        authorize(claims, WRITERS, Target::Identity(email))?;
        ctx.check()?;

        let mut state = self.state.write().await;
        ctx.check()?;

        let at = state
            .index
            .get(email)
            .map(|r| r.seat)
            .ok_or_else(|| CoreError::NoReservation(email.to_string()))?;
        let section = self.section_name(at)?;

        state.inventory.vacate(at)?;
        state.index.remove(email);
        drop(state);

        info!(email = %Masked(email), route = at.route, section = %section, seat = at.seat, "User removed");
        Ok(Removal {
            route_index: at.route,
            section,
            seat: at.seat,
        })
    }

    /// Moves a reservation to `new_seat` within its current route and section.
    pub async fn relocate(&self, ctx: &CallContext, claims: &Claims, email: &str, new_seat: u32) -> CoreResult<()> {
        authorize(claims, WRITERS, Target::Identity(email))?;
        ctx.check()?;

        let mut state = self.state.write().await;
        ctx.check()?;

        let from = state
            .index
            .get(email)
            .map(|r| r.seat)
            .ok_or_else(|| CoreError::NoReservation(email.to_string()))?;

        let seat_count = self.table.seat_count();
        if new_seat >= seat_count {
            return Err(CoreError::SeatOutOfRange {
                seat: new_seat,
                seat_count,
            });
        }
        let to = SeatRef { seat: new_seat, ..from };
        if !state.inventory.is_vacant(to) {
            return Err(CoreError::SeatOccupied);
        }

        let passenger = state
            .inventory
            .occupant(from)
            .cloned()
            .ok_or_else(|| CoreError::Internal(format!("reservation points at an empty seat: {:?}", from)))?;
        state.inventory.assign(to, passenger)?;
        state.inventory.vacate(from)?;
        state.index.set_seat(email, new_seat);
        drop(state);

        info!(email = %Masked(email), from = from.seat, to = new_seat, "Seat modified");
        Ok(())
    }

    /// `Ok(None)` when the identity holds no reservation.
    pub async fn get_receipt(&self, ctx: &CallContext, claims: &Claims, email: &str) -> CoreResult<Option<Receipt>> {
        authorize(claims, READERS, Target::Identity(email))?;
        ctx.check()?;

        let state = self.state.read().await;
        let Some(reservation) = state.index.get(email) else {
            debug!(email = %Masked(email), "No receipt found");
            return Ok(None);
        };

        let at = reservation.seat;
        let passenger = state.inventory.occupant(at).cloned().ok_or_else(|| {
            warn!(email = %Masked(email), seat = ?at, "Reservation without occupant");
            CoreError::Internal("reservation points at an empty seat".to_string())
        })?;
        let route = self
            .table
            .route(at.route)
            .cloned()
            .ok_or_else(|| CoreError::Internal(format!("unknown route index {}", at.route)))?;

        Ok(Some(Receipt {
            ticket_id: reservation.ticket_id,
            passenger,
            route,
            section: self.section_name(at)?,
            seat: at.seat,
            purchased_at: reservation.purchased_at,
        }))
    }

    /// Occupied seats of one section, ascending by seat number.
    pub async fn list_occupants(
        &self,
        ctx: &CallContext,
        claims: &Claims,
        route_index: usize,
        section: &str,
    ) -> CoreResult<Vec<SeatAssignment>> {
        authorize(claims, READERS, Target::Unowned)?;
        ctx.check()?;

        if self.table.route(route_index).is_none() {
            return Err(CoreError::RouteNotFound);
        }
        let section_index = self
            .table
            .section_index(section)
            .ok_or_else(|| CoreError::SectionNotFound(section.to_string()))?;

        let state = self.state.read().await;
        Ok(state
            .inventory
            .occupants(route_index, section_index)
            .into_iter()
            .map(|(seat, passenger)| SeatAssignment {
                seat,
                passenger: passenger.clone(),
            })
            .collect())
    }

    /// Number of occupied seats on a route.
    pub async fn occupied_seats(&self, route_index: usize) -> usize {
        self.state.read().await.inventory.occupied_count(route_index)
    }

    pub async fn reservation_count(&self) -> usize {
        self.state.read().await.index.len()
    }

    /// Cross-checks inventory and index; returns one line per mismatch.
    pub async fn consistency_violations(&self) -> Vec<String> {
        let state = self.state.read().await;
        let mut violations = Vec::new();

        for (email, reservation) in state.index.iter() {
            match state.inventory.occupant(reservation.seat) {
                Some(p) if &p.email == email => {}
                Some(_) => violations.push(format!("{} indexed at {:?} held by someone else", Masked(email), reservation.seat)),
                None => violations.push(format!("{} indexed at empty seat {:?}", Masked(email), reservation.seat)),
            }
        }

        for route in 0..self.table.routes().len() {
            for section in 0..self.table.sections().len() {
                for (seat, passenger) in state.inventory.occupants(route, section) {
                    let at = SeatRef::new(route, section, seat);
                    if state.index.get(&passenger.email).map(|r| r.seat) != Some(at) {
                        violations.push(format!("{} seated at {:?} without matching reservation", Masked(&passenger.email), at));
                    }
                }
            }
        }
        violations
    }

    fn section_name(&self, at: SeatRef) -> CoreResult<String> {
        self.table
            .section_name(at.section)
            .map(str::to_string)
            .ok_or_else(|| CoreError::Internal(format!("unknown section index {}", at.section)))
    }
}

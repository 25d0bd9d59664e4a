use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use gym_erp::application::{AuthSettings, ServiceDependencies};
use gym_erp::domain::{
    BookingId, ClassId, Email, InvoiceId, MemberId, PlanId, ScheduleId, StaffId,
    auth::{Principal, Session, SessionToken, StaffUser},
    booking::{self, Booking, UpcomingBooking},
    gym_class::{GymClass, NewClass},
    invoice::{self, Invoice, InvoiceWithMember, MemberSummary},
    member::{Member, MemberChanges, NewMember},
    plan::{MembershipPlan, NewPlan},
    schedule::{DateWindow, PersonalSchedule, ScheduleEntry, sort_chronologically},
};
use gym_erp::ports::{
    AssignmentOutcome, BillingStore, BookingStore, ClassRepository, MemberCredentials,
    MemberDeletion, MemberRepository, MemberWrite, PlanRepository, ReservationOutcome, Result,
    ScheduleRepository, SessionStore, StaffCredentials, StaffRepository,
};
use std::sync::{Arc, Mutex};

// ============================================================================
// インメモリ実装（テスト用）
// ============================================================================

#[derive(Default)]
struct GymState {
    members: Vec<(Member, Option<String>)>,
    plans: Vec<MembershipPlan>,
    classes: Vec<GymClass>,
    bookings: Vec<Booking>,
    invoices: Vec<Invoice>,
    schedules: Vec<PersonalSchedule>,
    staff: Vec<(StaffUser, String)>,
    sessions: Vec<Session>,
    last_id: i64,
}

impl GymState {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn member(&self, member_id: MemberId) -> Option<&Member> {
        self.members
            .iter()
            .map(|(member, _)| member)
            .find(|member| member.id == member_id)
    }

    fn email_taken(&self, email: &Email, except: Option<MemberId>) -> bool {
        self.members
            .iter()
            .any(|(member, _)| &member.email == email && Some(member.id) != except)
    }
}

/// すべてのポートを1つのロックで実装するインメモリストア
///
/// 各操作はロックを保持したまま完結するため、PostgreSQL実装の
/// トランザクションと同じく不可分に実行される。
#[derive(Default)]
pub struct InMemoryGym {
    state: Mutex<GymState>,
}

impl InMemoryGym {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn booking_count(&self, class_id: ClassId) -> usize {
        let state = self.state.lock().unwrap();
        state.bookings.iter().filter(|b| b.class_id == class_id).count()
    }

    pub fn invoice_count(&self) -> usize {
        self.state.lock().unwrap().invoices.len()
    }

    pub fn session_count(&self) -> usize {
        self.state.lock().unwrap().sessions.len()
    }

    pub fn password_hash_of(&self, member_id: MemberId) -> Option<String> {
        let state = self.state.lock().unwrap();
        state
            .members
            .iter()
            .find(|(member, _)| member.id == member_id)
            .and_then(|(_, hash)| hash.clone())
    }
}

/// インメモリストアでサービスの依存関係を組み立てる
///
/// テストを速くするため bcrypt のコストは最小値にする。
pub fn service_dependencies(store: Arc<InMemoryGym>) -> ServiceDependencies {
    ServiceDependencies {
        members: store.clone(),
        plans: store.clone(),
        classes: store.clone(),
        bookings: store.clone(),
        billing: store.clone(),
        schedules: store.clone(),
        staff: store.clone(),
        sessions: store,
        auth: AuthSettings {
            password_cost: 4,
            session_ttl: Duration::hours(24),
        },
    }
}

#[async_trait]
impl MemberRepository for InMemoryGym {
    async fn insert(&self, new_member: NewMember) -> Result<MemberWrite> {
        let mut state = self.state.lock().unwrap();
        if state.email_taken(&new_member.email, None) {
            return Ok(MemberWrite::EmailTaken);
        }

        let member = Member {
            id: MemberId::from_raw(state.next_id()),
            full_name: new_member.full_name,
            email: new_member.email,
            phone_number: new_member.phone_number,
            status: new_member.status,
            join_date: new_member.join_date,
            membership_plan_id: None,
        };
        state.members.push((member.clone(), None));
        Ok(MemberWrite::Saved(member))
    }

    async fn list(&self) -> Result<Vec<Member>> {
        let state = self.state.lock().unwrap();
        let mut members: Vec<Member> = state.members.iter().map(|(m, _)| m.clone()).collect();
        members.sort_by_key(|m| m.id);
        Ok(members)
    }

    async fn get_by_id(&self, member_id: MemberId) -> Result<Option<Member>> {
        let state = self.state.lock().unwrap();
        Ok(state.member(member_id).cloned())
    }

    async fn update(
        &self,
        member_id: MemberId,
        changes: MemberChanges,
    ) -> Result<Option<MemberWrite>> {
        let mut state = self.state.lock().unwrap();
        let Some(current) = state.member(member_id).cloned() else {
            return Ok(None);
        };

        let updated = changes.apply(&current);
        if state.email_taken(&updated.email, Some(member_id)) {
            return Ok(Some(MemberWrite::EmailTaken));
        }

        for (member, _) in state.members.iter_mut() {
            if member.id == member_id {
                *member = updated.clone();
            }
        }
        Ok(Some(MemberWrite::Saved(updated)))
    }

    async fn delete(&self, member_id: MemberId) -> Result<MemberDeletion> {
        let mut state = self.state.lock().unwrap();
        if state.member(member_id).is_none() {
            return Ok(MemberDeletion::NotFound);
        }
        if state.invoices.iter().any(|i| i.member_id == member_id) {
            return Ok(MemberDeletion::HasInvoices);
        }

        state.members.retain(|(m, _)| m.id != member_id);
        state.bookings.retain(|b| b.member_id != member_id);
        state.schedules.retain(|s| s.member_id != member_id);
        state
            .sessions
            .retain(|s| s.principal != Principal::Member(member_id));
        Ok(MemberDeletion::Deleted)
    }

    async fn set_password_hash(&self, member_id: MemberId, password_hash: String) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        match state.members.iter_mut().find(|(m, _)| m.id == member_id) {
            Some((_, hash)) => {
                *hash = Some(password_hash);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_credentials_by_email(&self, email: &Email) -> Result<Option<MemberCredentials>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .members
            .iter()
            .find(|(m, _)| &m.email == email)
            .map(|(member, hash)| MemberCredentials {
                member: member.clone(),
                password_hash: hash.clone(),
            }))
    }
}

#[async_trait]
impl PlanRepository for InMemoryGym {
    async fn insert(&self, plan: NewPlan) -> Result<MembershipPlan> {
        let mut state = self.state.lock().unwrap();
        let plan = MembershipPlan {
            id: PlanId::from_raw(state.next_id()),
            name: plan.name,
            price: plan.price,
            duration_days: plan.duration_days,
        };
        state.plans.push(plan.clone());
        Ok(plan)
    }

    async fn list(&self) -> Result<Vec<MembershipPlan>> {
        let state = self.state.lock().unwrap();
        let mut plans = state.plans.clone();
        plans.sort_by(|a, b| (a.price.value(), a.id).cmp(&(b.price.value(), b.id)));
        Ok(plans)
    }

    async fn get_by_id(&self, plan_id: PlanId) -> Result<Option<MembershipPlan>> {
        let state = self.state.lock().unwrap();
        Ok(state.plans.iter().find(|p| p.id == plan_id).cloned())
    }
}

#[async_trait]
impl ClassRepository for InMemoryGym {
    async fn insert(&self, class: NewClass) -> Result<GymClass> {
        let mut state = self.state.lock().unwrap();
        let class = GymClass {
            id: ClassId::from_raw(state.next_id()),
            title: class.title,
            trainer_name: class.trainer_name,
            start_time: class.start_time,
            end_time: class.end_time,
            capacity: class.capacity,
        };
        state.classes.push(class.clone());
        Ok(class)
    }

    async fn list(&self) -> Result<Vec<GymClass>> {
        let state = self.state.lock().unwrap();
        let mut classes = state.classes.clone();
        classes.sort_by_key(|c| (c.start_time, c.id));
        Ok(classes)
    }

    async fn get_by_id(&self, class_id: ClassId) -> Result<Option<GymClass>> {
        let state = self.state.lock().unwrap();
        Ok(state.classes.iter().find(|c| c.id == class_id).cloned())
    }
}

#[async_trait]
impl BookingStore for InMemoryGym {
    async fn reserve(
        &self,
        class_id: ClassId,
        member_id: MemberId,
        booked_at: DateTime<Utc>,
    ) -> Result<ReservationOutcome> {
        let mut state = self.state.lock().unwrap();
        let Some(class) = state.classes.iter().find(|c| c.id == class_id).cloned() else {
            return Ok(ReservationOutcome::ClassNotFound);
        };
        if state.member(member_id).is_none() {
            return Ok(ReservationOutcome::MemberNotFound);
        }

        let booked = state.bookings.iter().filter(|b| b.class_id == class_id).count() as i64;
        let already_booked = state
            .bookings
            .iter()
            .any(|b| b.class_id == class_id && b.member_id == member_id);
        if let Err(rejection) = booking::admit(&class, booked, already_booked) {
            return Ok(ReservationOutcome::Rejected(rejection));
        }

        let created = Booking {
            id: BookingId::from_raw(state.next_id()),
            class_id,
            member_id,
            created_at: booked_at,
        };
        state.bookings.push(created.clone());
        Ok(ReservationOutcome::Booked(created))
    }

    async fn upcoming_for_member(
        &self,
        member_id: MemberId,
        from: DateTime<Utc>,
    ) -> Result<Vec<UpcomingBooking>> {
        let state = self.state.lock().unwrap();
        let mut upcoming: Vec<UpcomingBooking> = state
            .bookings
            .iter()
            .filter(|b| b.member_id == member_id)
            .filter_map(|b| {
                state
                    .classes
                    .iter()
                    .find(|c| c.id == b.class_id && c.start_time >= from)
                    .map(|c| UpcomingBooking {
                        booking: b.clone(),
                        class: c.clone(),
                    })
            })
            .collect();
        upcoming.sort_by_key(|u| (u.class.start_time, u.booking.id));
        Ok(upcoming)
    }
}

#[async_trait]
impl BillingStore for InMemoryGym {
    async fn assign_plan(
        &self,
        member_id: MemberId,
        plan_id: PlanId,
        assigned_at: DateTime<Utc>,
    ) -> Result<AssignmentOutcome> {
        let mut state = self.state.lock().unwrap();
        let Some(plan) = state.plans.iter().find(|p| p.id == plan_id).cloned() else {
            return Ok(AssignmentOutcome::PlanNotFound);
        };
        let Some((member, _)) = state.members.iter_mut().find(|(m, _)| m.id == member_id) else {
            return Ok(AssignmentOutcome::MemberNotFound);
        };
        member.membership_plan_id = Some(plan.id);
        let member = member.clone();

        let issued = invoice::issue_for_plan(member.id, &plan, assigned_at);
        let created = Invoice {
            id: InvoiceId::from_raw(state.next_id()),
            member_id: issued.member_id,
            amount: issued.amount,
            status: issued.status,
            due_date: issued.due_date,
            paid_at: None,
            created_at: issued.created_at,
        };
        state.invoices.push(created.clone());

        Ok(AssignmentOutcome::Assigned {
            member,
            invoice: created,
        })
    }

    async fn mark_paid(
        &self,
        invoice_id: InvoiceId,
        paid_at: DateTime<Utc>,
    ) -> Result<Option<Invoice>> {
        let mut state = self.state.lock().unwrap();
        let Some(stored) = state.invoices.iter_mut().find(|i| i.id == invoice_id) else {
            return Ok(None);
        };
        *stored = invoice::mark_paid(stored.clone(), paid_at);
        Ok(Some(stored.clone()))
    }

    async fn list_with_members(&self) -> Result<Vec<InvoiceWithMember>> {
        let state = self.state.lock().unwrap();
        let mut invoices: Vec<InvoiceWithMember> = state
            .invoices
            .iter()
            .filter_map(|inv| {
                state.member(inv.member_id).map(|m| InvoiceWithMember {
                    invoice: inv.clone(),
                    member: MemberSummary {
                        id: m.id,
                        full_name: m.full_name.clone(),
                    },
                })
            })
            .collect();
        invoices.sort_by(|a, b| {
            (b.invoice.due_date, b.invoice.id).cmp(&(a.invoice.due_date, a.invoice.id))
        });
        Ok(invoices)
    }

    async fn find_by_member(&self, member_id: MemberId) -> Result<Vec<Invoice>> {
        let state = self.state.lock().unwrap();
        let mut invoices: Vec<Invoice> = state
            .invoices
            .iter()
            .filter(|i| i.member_id == member_id)
            .cloned()
            .collect();
        invoices.sort_by(|a, b| (b.due_date, b.id).cmp(&(a.due_date, a.id)));
        Ok(invoices)
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryGym {
    async fn insert(
        &self,
        member_id: MemberId,
        entry: ScheduleEntry,
    ) -> Result<Option<PersonalSchedule>> {
        let mut state = self.state.lock().unwrap();
        if !state.members.iter().any(|(m, _)| m.id == member_id) {
            return Ok(None);
        }
        let schedule = PersonalSchedule {
            id: ScheduleId::from_raw(state.next_id()),
            member_id,
            entry,
        };
        state.schedules.push(schedule.clone());
        Ok(Some(schedule))
    }

    async fn list_for_member(&self, member_id: MemberId) -> Result<Vec<PersonalSchedule>> {
        let state = self.state.lock().unwrap();
        let mut schedules: Vec<PersonalSchedule> = state
            .schedules
            .iter()
            .filter(|s| s.member_id == member_id)
            .cloned()
            .collect();
        sort_chronologically(&mut schedules);
        Ok(schedules)
    }

    async fn list_within(
        &self,
        member_id: MemberId,
        window: DateWindow,
    ) -> Result<Vec<PersonalSchedule>> {
        let mut schedules = self.list_for_member(member_id).await?;
        schedules.retain(|s| window.contains(s.entry.date));
        Ok(schedules)
    }

    async fn replace(
        &self,
        schedule_id: ScheduleId,
        entry: ScheduleEntry,
    ) -> Result<Option<PersonalSchedule>> {
        let mut state = self.state.lock().unwrap();
        let Some(stored) = state.schedules.iter_mut().find(|s| s.id == schedule_id) else {
            return Ok(None);
        };
        stored.entry = entry;
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, schedule_id: ScheduleId) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.schedules.len();
        state.schedules.retain(|s| s.id != schedule_id);
        Ok(state.schedules.len() < before)
    }
}

#[async_trait]
impl StaffRepository for InMemoryGym {
    async fn insert(&self, email: Email, password_hash: String) -> Result<Option<StaffUser>> {
        let mut state = self.state.lock().unwrap();
        if state.staff.iter().any(|(u, _)| u.email == email) {
            return Ok(None);
        }

        let user = StaffUser {
            id: StaffId::from_raw(state.next_id()),
            email,
            created_at: Utc::now(),
        };
        state.staff.push((user.clone(), password_hash));
        Ok(Some(user))
    }

    async fn get_by_id(&self, staff_id: StaffId) -> Result<Option<StaffUser>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .staff
            .iter()
            .find(|(u, _)| u.id == staff_id)
            .map(|(u, _)| u.clone()))
    }

    async fn find_credentials_by_email(&self, email: &Email) -> Result<Option<StaffCredentials>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .staff
            .iter()
            .find(|(u, _)| &u.email == email)
            .map(|(user, hash)| StaffCredentials {
                user: user.clone(),
                password_hash: hash.clone(),
            }))
    }
}

#[async_trait]
impl SessionStore for InMemoryGym {
    async fn save(&self, session: Session) -> Result<()> {
        self.state.lock().unwrap().sessions.push(session);
        Ok(())
    }

    async fn find(&self, token: SessionToken) -> Result<Option<Session>> {
        let state = self.state.lock().unwrap();
        Ok(state.sessions.iter().find(|s| s.token == token).cloned())
    }

    async fn revoke(&self, token: SessionToken) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.sessions.len();
        state.sessions.retain(|s| s.token != token);
        Ok(state.sessions.len() < before)
    }
}

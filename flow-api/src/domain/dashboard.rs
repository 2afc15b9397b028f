use serde::Serialize;

use super::payment::{Payment, PaymentStatus};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_revenue: f64,
    pub pending_amount: f64,
    pub active_projects_count: i64,
    pub total_clients_count: i64,
}

impl DashboardStats {
    /// Recomputed on every request; nothing is cached or persisted.
    pub fn compute(payments: &[Payment], active_projects: i64, total_clients: i64) -> Self {
        let total_revenue = payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Paid)
            .map(|p| p.amount)
            .sum();

        let pending_amount = payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Unpaid)
            .map(|p| p.amount)
            .sum();

        Self {
            total_revenue,
            pending_amount,
            active_projects_count: active_projects,
            total_clients_count: total_clients,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn payment(amount: f64, status: PaymentStatus) -> Payment {
        Payment::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            amount,
            Utc::now(),
            Some(status),
            None,
            Utc::now(),
        )
    }

    #[test]
    fn splits_paid_and_unpaid_amounts() {
        let payments = vec![
            payment(100.0, PaymentStatus::Paid),
            payment(50.0, PaymentStatus::Unpaid),
        ];

        let stats = DashboardStats::compute(&payments, 2, 3);

        assert_eq!(stats.total_revenue, 100.0);
        assert_eq!(stats.pending_amount, 50.0);
        assert_eq!(stats.active_projects_count, 2);
        assert_eq!(stats.total_clients_count, 3);
    }

    #[test]
    fn empty_payments_sum_to_zero() {
        let stats = DashboardStats::compute(&[], 0, 0);
        assert_eq!(stats.total_revenue, 0.0);
        assert_eq!(stats.pending_amount, 0.0);
    }
}

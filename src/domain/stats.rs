use serde::Serialize;

use super::{Order, OrderStatus};

/// Aggregate figures for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OrderStats {
    pub total_orders: usize,
    pub completed_orders: usize,
    /// Sum of `total_amount` over completed orders.
    pub revenue: u64,
    /// Completed share of all orders as a rounded percentage.
    pub completion_rate: u32,
}

impl OrderStats {
    pub fn from_orders(orders: &[Order]) -> Self {
        let completed: Vec<&Order> = orders
            .iter()
            .filter(|order| order.status == OrderStatus::Completed)
            .collect();
        let total_orders = orders.len();
        let completed_orders = completed.len();
        let completion_rate = if total_orders == 0 {
            0
        } else {
            // Integer round-half-up of completed * 100 / total.
            ((completed_orders * 200 + total_orders) / (total_orders * 2)) as u32
        };

        Self {
            total_orders,
            completed_orders,
            revenue: completed
                .iter()
                .fold(0u64, |sum, order| sum.saturating_add(order.total_amount)),
            completion_rate,
        }
    }
}

/// Orders bucketed for the staff dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusBoard {
    pub pending: Vec<Order>,
    pub preparing: Vec<Order>,
    pub ready: Vec<Order>,
    /// Completed and cancelled orders.
    pub finished: Vec<Order>,
}

impl StatusBoard {
    pub fn from_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        let mut board = Self::default();
        for order in orders {
            match order.status {
                OrderStatus::Pending => board.pending.push(order),
                OrderStatus::Preparing => board.preparing.push(order),
                OrderStatus::Ready => board.ready.push(order),
                OrderStatus::Completed | OrderStatus::Cancelled => board.finished.push(order),
            }
        }
        board
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::PaymentStatus;

    fn order(id: &str, status: OrderStatus, total_amount: u64) -> Order {
        Order {
            id: id.to_string(),
            user_id: "client-1".to_string(),
            user_name: "Student 1".to_string(),
            roll_number: None,
            items: Vec::new(),
            status,
            total_amount,
            order_time: Utc::now(),
            payment_status: PaymentStatus::Completed,
        }
    }

    #[test]
    fn test_empty_ledger() {
        assert_eq!(OrderStats::from_orders(&[]), OrderStats::default());
    }

    #[test]
    fn test_revenue_counts_completed_only() {
        let orders = vec![
            order("a", OrderStatus::Completed, 150),
            order("b", OrderStatus::Cancelled, 90),
            order("c", OrderStatus::Ready, 40),
        ];
        let stats = OrderStats::from_orders(&orders);

        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.completed_orders, 1);
        assert_eq!(stats.revenue, 150);
        assert_eq!(stats.completion_rate, 33);
    }

    #[test]
    fn test_completion_rate_rounds_half_up() {
        let orders = vec![
            order("a", OrderStatus::Completed, 1),
            order("b", OrderStatus::Pending, 1),
            order("c", OrderStatus::Completed, 1),
        ];
        // 2/3 = 66.67%
        assert_eq!(OrderStats::from_orders(&orders).completion_rate, 67);

        let orders = vec![order("a", OrderStatus::Completed, 1), order("b", OrderStatus::Pending, 1)];
        assert_eq!(OrderStats::from_orders(&orders).completion_rate, 50);
    }

    #[test]
    fn test_status_board_buckets() {
        let board = StatusBoard::from_orders(vec![
            order("a", OrderStatus::Pending, 1),
            order("b", OrderStatus::Completed, 1),
            order("c", OrderStatus::Cancelled, 1),
            order("d", OrderStatus::Ready, 1),
        ]);

        assert_eq!(board.pending.len(), 1);
        assert!(board.preparing.is_empty());
        assert_eq!(board.ready[0].id, "d");
        let finished: Vec<&str> = board.finished.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(finished, vec!["b", "c"]);
    }
}

use tracing::{info, Instrument};

use cafe_orders::{
    setup_tracing, CafeConfig, CafeSystem, Credentials, OrderStatus, Recipient, Role, SystemError,
};

#[tokio::main]
async fn main() -> Result<(), SystemError> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = CafeConfig::from_env();
    info!(?config, "Starting cafeteria demo");

    let system = CafeSystem::start(&config).await?;

    // A student signs in, fills the cart and pays
    let span = tracing::info_span!("student_checkout");
    let order_id = async {
        let student = system
            .session
            .login(Credentials::Client {
                roll_number: "21CS001".to_string(),
                phone_number: "9876543210".to_string(),
            })
            .await?;
        info!(user = %student.name, "Student signed in");

        system.add_to_cart("1").await?;
        system.add_to_cart("1").await?;
        system.add_to_cart("2").await?;
        info!(total = system.cart.total_price().await?, "Cart ready");

        Ok::<_, SystemError>(system.checkout().await?)
    }
    .instrument(span)
    .await?;

    info!(order_id = %order_id, "Order placed");

    // The kitchen works through its queue from the staff terminal
    let span = tracing::info_span!("kitchen");
    async {
        let queue = system.orders.orders_by_status(OrderStatus::Pending).await?;
        info!(pending = queue.len(), "Kitchen queue");

        let kitchen_notices = system.notifications.all().await?;
        for notification in kitchen_notices
            .iter()
            .filter(|n| n.recipient == Recipient::Role(Role::Cafeteria))
        {
            info!(message = %notification.message, "Kitchen notification");
        }

        system.orders.update_status(order_id.clone(), OrderStatus::Preparing).await?;
        system.orders.update_status(order_id.clone(), OrderStatus::Ready).await?;
        Ok::<_, SystemError>(())
    }
    .instrument(span)
    .await?;

    // The student sees the pickup notice and confirms
    let span = tracing::info_span!("pickup");
    async {
        let Some(student) = system.session.current() else {
            return Ok(());
        };
        for notification in system.notifications.unread_for(&student).await? {
            info!(message = %notification.message, "Student notification");
            system.notifications.mark_read(notification.id).await?;
        }
        system.advance_order(order_id.clone(), OrderStatus::Completed).await?;
        Ok::<_, SystemError>(())
    }
    .instrument(span)
    .await?;

    let stats = system.orders.stats().await?;
    info!(
        total = stats.total_orders,
        completed = stats.completed_orders,
        revenue = stats.revenue,
        completion_rate = stats.completion_rate,
        "Order stats"
    );

    system.session.logout()?;
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}

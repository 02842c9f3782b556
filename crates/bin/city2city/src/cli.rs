//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use city2city_domain::car::CarStatus;
use city2city_domain::id::{CarId, CityId, CustomerId, DriverId, TripCustomerId, TripId};
use city2city_domain::pagination::ListRequest;

use crate::config::DEFAULT_PATH;

#[derive(Parser, Debug)]
#[command(author, version, about = "Manage cities, drivers, cars, trips and bookings.")]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Cities served by drivers and trips.
    #[command(subcommand)]
    City(CityCommand),
    /// Customers who book trips.
    #[command(subcommand)]
    Customer(CustomerCommand),
    #[command(subcommand)]
    Driver(DriverCommand),
    #[command(subcommand)]
    Car(CarCommand),
    #[command(subcommand)]
    Trip(TripCommand),
    /// Customers booked onto trips.
    #[command(subcommand)]
    Booking(BookingCommand),
}

/// Page selection shared by every `list` subcommand.
#[derive(Args, Debug, Clone, Copy)]
pub struct PageArgs {
    /// 1-based page number.
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Rows per page.
    #[arg(long, default_value_t = 10)]
    pub limit: u32,
}

impl From<PageArgs> for ListRequest {
    fn from(args: PageArgs) -> Self {
        Self::new(args.page, args.limit)
    }
}

#[derive(Subcommand, Debug)]
pub enum CityCommand {
    Create {
        #[arg(long)]
        name: String,
    },
    Get {
        id: CityId,
    },
    List(PageArgs),
    Rename {
        id: CityId,
        #[arg(long)]
        name: String,
    },
    Delete {
        id: CityId,
    },
}

#[derive(Args, Debug)]
pub struct CustomerArgs {
    #[arg(long)]
    pub full_name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub email: String,
}

#[derive(Subcommand, Debug)]
pub enum CustomerCommand {
    Create(CustomerArgs),
    Get {
        id: CustomerId,
    },
    List(PageArgs),
    Update {
        id: CustomerId,
        #[command(flatten)]
        details: CustomerArgs,
    },
    Delete {
        id: CustomerId,
    },
}

#[derive(Args, Debug)]
pub struct DriverArgs {
    #[arg(long)]
    pub full_name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long = "from")]
    pub from_city_id: CityId,
    #[arg(long = "to")]
    pub to_city_id: CityId,
}

#[derive(Subcommand, Debug)]
pub enum DriverCommand {
    Create(DriverArgs),
    Get {
        id: DriverId,
    },
    List(PageArgs),
    Update {
        id: DriverId,
        #[command(flatten)]
        details: DriverArgs,
    },
    Delete {
        id: DriverId,
    },
}

#[derive(Args, Debug)]
pub struct CarArgs {
    #[arg(long)]
    pub model: String,
    #[arg(long)]
    pub brand: String,
    /// Registration plate.
    #[arg(long)]
    pub number: String,
    #[arg(long = "driver")]
    pub driver_id: DriverId,
}

#[derive(Subcommand, Debug)]
pub enum CarCommand {
    Create(CarArgs),
    Get {
        id: CarId,
    },
    List(PageArgs),
    Update {
        id: CarId,
        #[command(flatten)]
        details: CarArgs,
    },
    /// Switch a car between `active` and `inactive`.
    Status {
        id: CarId,
        status: CarStatus,
    },
    /// Send a car on a new route; the departure time is set to now.
    Route {
        id: CarId,
        #[arg(long = "from")]
        from_city_id: CityId,
        #[arg(long = "to")]
        to_city_id: CityId,
    },
    Delete {
        id: CarId,
    },
}

#[derive(Args, Debug)]
pub struct TripArgs {
    #[arg(long = "from")]
    pub from_city_id: CityId,
    #[arg(long = "to")]
    pub to_city_id: CityId,
    #[arg(long = "driver")]
    pub driver_id: DriverId,
    #[arg(long)]
    pub price: f64,
}

#[derive(Subcommand, Debug)]
pub enum TripCommand {
    Create(TripArgs),
    Get {
        id: TripId,
    },
    /// Most recent trips first.
    List(PageArgs),
    Update {
        id: TripId,
        #[command(flatten)]
        details: TripArgs,
    },
    Delete {
        id: TripId,
    },
}

#[derive(Subcommand, Debug)]
pub enum BookingCommand {
    Create {
        #[arg(long = "trip")]
        trip_id: TripId,
        #[arg(long = "customer")]
        customer_id: CustomerId,
    },
    Get {
        id: TripCustomerId,
    },
    List(PageArgs),
    /// Move a booking to another customer.
    Reassign {
        id: TripCustomerId,
        #[arg(long = "customer")]
        customer_id: CustomerId,
    },
    Delete {
        id: TripCustomerId,
    },
}

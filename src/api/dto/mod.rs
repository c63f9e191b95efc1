//! Request/response DTOs organized by resource.

pub mod common_dto;
pub mod driver_dto;
pub mod hotel_dto;
pub mod restaurant_dto;
pub mod ride_dto;

pub use common_dto::MessageResponse;
pub use driver_dto::{DriverResponse, RegisterDriverRequest, UpdateDriverStatusRequest};
pub use hotel_dto::{
    BookHotelRequest, BookingDto, BookingResponse, CreateHotelRequest, HotelQuery, HotelResponse,
};
pub use restaurant_dto::{
    CreateRestaurantRequest, OrderItemDto, OrderReceiptDto, OrderResponse, PlaceOrderRequest,
    RestaurantQuery, RestaurantResponse,
};
pub use ride_dto::{AcceptRideRequest, CreateRideRequest, RideDetailResponse, RideResponse};

//! End-to-end tests driving the HTTP router without binding a socket.
